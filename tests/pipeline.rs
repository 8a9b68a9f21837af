use std::{collections::HashSet, io::Read, path::Path};

use anyhow::Result;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use squish::{
    handles::open_input, read_ledger, restore_file, sort_file, RestoreConfig, SortConfig, Strategy,
    STRATEGIES,
};

fn random_fastq(n_records: usize, seed: u64) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut fastq = b"# leading comment\n\n".to_vec();
    for i in 0..n_records {
        let len = rng.random_range(0..40);
        let seq: Vec<u8> = (0..len).map(|_| b"ACGTN"[rng.random_range(0..5)]).collect();
        let qual: Vec<u8> = (0..len).map(|_| rng.random_range(b'!'..=b'J')).collect();
        fastq.extend_from_slice(format!("@read{i} lane=1\n").as_bytes());
        fastq.extend_from_slice(&seq);
        fastq.extend_from_slice(b"\n+\n");
        fastq.extend_from_slice(&qual);
        fastq.push(b'\n');
    }
    fastq
}

fn read_all(path: &Path) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    open_input(path)?.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Splits a FASTQ buffer into its four-line records.
fn records_of(fastq: &[u8]) -> Vec<Vec<u8>> {
    let lines: Vec<&[u8]> = fastq
        .split_inclusive(|&b| b == b'\n')
        .skip_while(|line| !line.starts_with(b"@"))
        .collect();
    lines.chunks(4).map(|chunk| chunk.concat()).collect()
}

#[test]
fn sort_and_restore_every_strategy() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("reads.fastq");
    let original = random_fastq(500, 1234);
    std::fs::write(&input, &original)?;
    let original_records = records_of(&original);

    for (i, info) in STRATEGIES.iter().enumerate() {
        let sorted = dir.path().join(format!("sorted_{i}.fastq"));
        let order = dir.path().join(format!("order_{i}.txt"));
        let restored = dir.path().join(format!("restored_{i}.fastq"));

        let config = SortConfig::builder()
            .input(&input)
            .output(&sorted)
            .order_path(&order)
            .strategy(info.strategy)
            .build()?;
        let summary = sort_file(&config)?;
        assert_eq!(summary.records, 500, "{}", info.name);

        // The ledger is a permutation of 1..=N
        let ledger = read_ledger(std::fs::read(&order)?.as_slice())?;
        let distinct: HashSet<_> = ledger.iter().copied().collect();
        assert_eq!(ledger.len(), 500);
        assert_eq!(distinct, (1..=500).collect::<HashSet<_>>());

        // Applying the ledger to the sorted output gives back the input records
        let sorted_records = records_of(&read_all(&sorted)?);
        for (position, &index) in ledger.iter().enumerate() {
            assert_eq!(sorted_records[position], original_records[index - 1]);
        }

        let config = RestoreConfig::builder()
            .input(&sorted)
            .output(&restored)
            .order_path(&order)
            .build()?;
        assert_eq!(restore_file(&config)?.records, 500);
        assert_eq!(records_of(&read_all(&restored)?), original_records);
    }
    Ok(())
}

#[test]
fn compressed_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("reads.fastq");
    let original = random_fastq(200, 99);
    std::fs::write(&input, &original)?;

    for ext in ["gz", "zst"] {
        let sorted = dir.path().join(format!("sorted.fastq.{ext}"));
        let order = dir.path().join(format!("order_{ext}.txt"));
        let restored = dir.path().join(format!("restored.fastq.{ext}"));

        let config = SortConfig::builder()
            .input(&input)
            .output(&sorted)
            .order_path(&order)
            .strategy(Strategy::Composition)
            .build()?;
        sort_file(&config)?;

        let config = RestoreConfig::builder()
            .input(&sorted)
            .output(&restored)
            .order_path(&order)
            .build()?;
        restore_file(&config)?;

        assert_eq!(records_of(&read_all(&restored)?), records_of(&original));
    }
    Ok(())
}

#[test]
fn truncated_input_is_fatal() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("truncated.fastq");
    std::fs::write(&input, b"@r1\nACGT\n+\nIIII\n@r2\nACGT\n+\n")?;

    let config = SortConfig::builder()
        .input(&input)
        .output(dir.path().join("out.fastq"))
        .order_path(dir.path().join("order.txt"))
        .build()?;
    let err = sort_file(&config).unwrap_err();
    assert!(err.to_string().contains("Record 2 is truncated"));
    Ok(())
}

#[test]
fn restore_with_mismatched_ledger() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let sorted = dir.path().join("sorted.fastq");
    let order = dir.path().join("order.txt");
    std::fs::write(&sorted, b"@B\nAATT\n+\nIIII\n@A\nTTAA\n+\nIIII\n")?;
    std::fs::write(&order, b"2\n1\n3\n")?;

    let config = RestoreConfig::builder()
        .input(&sorted)
        .output(dir.path().join("restored.fastq"))
        .order_path(&order)
        .build()?;
    assert!(restore_file(&config).is_err());
    Ok(())
}

#[test]
fn empty_input() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("empty.fastq");
    let output = dir.path().join("out.fastq");
    let order = dir.path().join("order.txt");
    std::fs::write(&input, b"")?;

    let config = SortConfig::builder()
        .input(&input)
        .output(&output)
        .order_path(&order)
        .strategy(Strategy::Kmer)
        .build()?;
    assert_eq!(sort_file(&config)?.records, 0);
    assert!(std::fs::read(&output)?.is_empty());
    assert!(std::fs::read(&order)?.is_empty());
    Ok(())
}
