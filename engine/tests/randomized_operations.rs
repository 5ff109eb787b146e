//! Drives a long random sequence of operations against the same virtual
//! disk and checks, after every single one, that the invariants the
//! allocator and the inode table are supposed to uphold still hold:
//! every live inode's blocks are marked allocated, and nothing is marked
//! allocated that no live inode or directory entry still points to.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use vdfs::device::MemDisk;
use vdfs::inode::{read_inode, InodeType};
use vdfs::layout::{InodeRef, N_BLOCKS, N_INODES, ROOT_INODE, UNALLOCATED_BLOCK};
use vdfs::master::{is_block_allocated, is_inode_allocated};
use vdfs::ops::{append, create, format, mkdir, more, remove, rmdir};

fn check_invariants(disk: &mut MemDisk) {
    let mut blocks_owned: HashSet<u8> = HashSet::new();

    for i in 0..N_INODES as InodeRef {
        let allocated = is_inode_allocated(disk, i).unwrap();
        let inode = read_inode(disk, i).unwrap();

        if allocated {
            assert_ne!(inode.kind, InodeType::None, "inode {i} is marked allocated but unused");
            for &b in inode.data.iter() {
                if b != UNALLOCATED_BLOCK {
                    assert!(
                        is_block_allocated(disk, b).unwrap(),
                        "inode {i} references block {b} which the bitmap marks free"
                    );
                    assert!(blocks_owned.insert(b), "block {b} is referenced by more than one inode");
                }
            }
        } else {
            assert_eq!(inode.kind, InodeType::None, "inode {i} is free but still has a kind");
        }
    }

    // Blocks 0 through 9 are permanently reserved by the master block, the
    // inode table and the root directory.
    for r in 0..10u8 {
        assert!(is_block_allocated(disk, r).unwrap());
    }
}

#[test]
fn random_sequence_of_operations_preserves_allocator_invariants() {
    let mut disk = MemDisk::new();
    format(&mut disk).unwrap();
    check_invariants(&mut disk);

    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut live_dirs: Vec<String> = vec!["/".to_string()];
    let mut live_files: Vec<String> = Vec::new();
    let mut next_id = 0u32;

    for _ in 0..400 {
        match rng.gen_range(0..5) {
            0 => {
                let parent = live_dirs[rng.gen_range(0..live_dirs.len())].clone();
                let name = format!("d{next_id}");
                next_id += 1;
                let path = format!("{}/{}", parent.trim_end_matches('/'), name);
                if mkdir(&mut disk, ROOT_INODE, &path).is_ok() {
                    live_dirs.push(path);
                }
            }
            1 => {
                let parent = live_dirs[rng.gen_range(0..live_dirs.len())].clone();
                let name = format!("f{next_id}");
                next_id += 1;
                let path = format!("{}/{}", parent.trim_end_matches('/'), name);
                if create(&mut disk, ROOT_INODE, &path, b"").is_ok() {
                    live_files.push(path);
                }
            }
            2 => {
                if !live_files.is_empty() {
                    let idx = rng.gen_range(0..live_files.len());
                    let path = live_files[idx].clone();
                    let payload: Vec<u8> = (0..rng.gen_range(1..40)).map(|_| rng.gen()).collect();
                    append(&mut disk, ROOT_INODE, &path, &payload).unwrap();
                    let contents = more(&mut disk, ROOT_INODE, &path).unwrap();
                    assert!(contents.len() >= payload.len());
                }
            }
            3 => {
                if !live_files.is_empty() {
                    let idx = rng.gen_range(0..live_files.len());
                    let path = live_files.remove(idx);
                    remove(&mut disk, ROOT_INODE, &path).unwrap();
                }
            }
            _ => {
                if live_dirs.len() > 1 {
                    let idx = rng.gen_range(1..live_dirs.len());
                    let path = live_dirs[idx].clone();
                    if rmdir(&mut disk, ROOT_INODE, &path).is_ok() {
                        live_dirs.remove(idx);
                    }
                }
            }
        }

        check_invariants(&mut disk);
    }
}

#[test]
fn block_exhaustion_is_reported_rather_than_panicking() {
    let mut disk = MemDisk::new();
    format(&mut disk).unwrap();

    let mut created: usize = 0;
    for i in 0.. {
        let path = format!("/f{i}");
        match create(&mut disk, ROOT_INODE, &path, b"") {
            Ok(_) => created += 1,
            Err(_) => break,
        }
        if created > N_BLOCKS + N_INODES {
            panic!("create() never reported exhaustion");
        }
    }

    check_invariants(&mut disk);
    assert!(created > 0);
}
