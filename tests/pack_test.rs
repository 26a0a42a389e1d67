use kspack::pack::{container_file_name, pack_all, pack_folder};
use kspack::source::{DirArchive, SourceArchive};
use kspack::ContainerReader;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn grid_text(seed: u8) -> String {
    (0..9)
        .map(|r| {
            let digits: Vec<String> = (0..9)
                .map(|c| (((r * 9 + c + seed as usize) % 9) + 1).to_string())
                .collect();
            format!("[{}]", digits.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_pair(folder: &Path, base: &str, killer: &str, ans: &str) {
    fs::write(folder.join(format!("{base}.killer")), killer).unwrap();
    fs::write(folder.join(format!("{base}.ans")), ans).unwrap();
}

/// Three good pairs plus one whose solution has only 8 rows.
fn seed_folder(root: &Path, folder: &str) {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).unwrap();

    for (i, base) in ["alpha", "beta", "gamma"].iter().enumerate() {
        let killer = format!("17 = (0,0),(0,1)\n{} = (1,0),(1,1),(2,1)\n", 10 + i);
        write_pair(&dir, base, &killer, &grid_text(i as u8));
    }

    let eight_rows: String = grid_text(0).lines().take(8).collect::<Vec<_>>().join("\n");
    write_pair(&dir, "broken", "9 = (4,4)\n", &eight_rows);

    // Unpaired and unrelated entries must be excluded, not failed on.
    fs::write(dir.join("orphan.killer"), "5 = (0,0)\n").unwrap();
    fs::write(dir.join("readme.txt"), "not a puzzle\n").unwrap();
}

#[test]
fn test_dir_archive_lists_only_complete_pairs() {
    let src = tempdir().unwrap();
    seed_folder(src.path(), "4");

    let archive = DirArchive::open(src.path()).unwrap();
    let pairs = archive.entry_pairs("4").unwrap();
    assert_eq!(pairs.len(), 4);
    // Sorted by base name, both entry names resolvable.
    assert!(pairs[0].killer.ends_with("alpha.killer"));
    assert!(pairs[0].ans.ends_with("alpha.ans"));
    for pair in &pairs {
        archive.read_text(&pair.killer).unwrap();
        archive.read_text(&pair.ans).unwrap();
    }
}

#[test]
fn test_pack_folder_skips_bad_record_and_counts_survivors() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    seed_folder(src.path(), "4");

    let archive = DirArchive::open(src.path()).unwrap();
    let out_file = out.path().join(container_file_name(4));
    let report = pack_folder(&archive, "4", &out_file).unwrap();
    assert_eq!(report.attempted, 4);
    assert_eq!(report.written, 3);

    let mut reader = ContainerReader::open(&out_file).unwrap();
    assert_eq!(reader.record_count(), 3);

    // Records land in sorted pair order: alpha, beta, gamma.
    for (i, seed) in [0u8, 1, 2].iter().enumerate() {
        let record = reader.fetch(i as u32).unwrap();
        let text = record.to_text();
        let (grid_part, cage_part) = text.split_once("\n\n").unwrap();
        assert_eq!(grid_part, grid_text(*seed));
        assert_eq!(
            cage_part,
            format!("17 = (0,0),(0,1)\n{} = (1,0),(1,1),(2,1)", 10 + i)
        );
    }
}

#[test]
fn test_pack_is_deterministic() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    seed_folder(src.path(), "4");
    let archive = DirArchive::open(src.path()).unwrap();

    let file_a = out.path().join("a.ks");
    let file_b = out.path().join("b.ks");
    pack_folder(&archive, "4", &file_a).unwrap();
    pack_folder(&archive, "4", &file_b).unwrap();
    assert_eq!(fs::read(file_a).unwrap(), fs::read(file_b).unwrap());
}

#[test]
fn test_zero_survivors_produces_no_file() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    let dir = src.path().join("7");
    fs::create_dir_all(&dir).unwrap();
    write_pair(&dir, "only", "3 = (0,0)\n", "no grid here\n");

    let archive = DirArchive::open(src.path()).unwrap();
    let out_file = out.path().join(container_file_name(7));
    let report = pack_folder(&archive, "7", &out_file).unwrap();
    assert_eq!(report.attempted, 1);
    assert_eq!(report.written, 0);
    assert!(!out_file.exists());
}

#[test]
fn test_empty_folder_produces_no_file() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::create_dir_all(src.path().join("5")).unwrap();

    let archive = DirArchive::open(src.path()).unwrap();
    let out_file = out.path().join(container_file_name(5));
    let report = pack_folder(&archive, "5", &out_file).unwrap();
    assert_eq!(report.attempted, 0);
    assert!(!out_file.exists());
}

#[test]
fn test_record_with_no_cage_lines_still_packs() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    let dir = src.path().join("2");
    fs::create_dir_all(&dir).unwrap();
    write_pair(&dir, "bare", "nothing usable on any line\n", &grid_text(3));

    let archive = DirArchive::open(src.path()).unwrap();
    let out_file = out.path().join(container_file_name(2));
    let report = pack_folder(&archive, "2", &out_file).unwrap();
    assert_eq!(report.written, 1);

    let mut reader = ContainerReader::open(&out_file).unwrap();
    let record = reader.fetch(0).unwrap();
    assert!(record.cages.is_empty());
    // Renders as nine rows, a separator, and nothing after it.
    assert!(record.to_text().ends_with('\n'));
}

#[test]
fn test_pack_all_survives_a_missing_folder() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    seed_folder(src.path(), "4");

    let archive = DirArchive::open(src.path()).unwrap();
    let total = pack_all(&archive, out.path(), &[4, 77]);
    assert_eq!(total, 3);
    assert!(out.path().join(container_file_name(4)).exists());
    assert!(!out.path().join(container_file_name(77)).exists());
}
