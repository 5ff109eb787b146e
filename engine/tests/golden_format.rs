//! Checks that `format` produces the exact on-disk bytes the layout
//! constants promise: blocks 0 through `ROOT_DIRECTORY_BLOCK` and inode 0
//! marked allocated, and nothing else.

use vdfs::device::MemDisk;
use vdfs::inode::{read_inode, InodeType};
use vdfs::layout::ROOT_INODE;
use vdfs::master::{read_block_bitmap, read_inode_bitmap};
use vdfs::ops::format;

#[test]
fn format_stamps_the_expected_bitmap_bytes() {
    let mut disk = MemDisk::new();
    format(&mut disk).unwrap();

    let blocks = read_block_bitmap(&mut disk).unwrap();
    assert_eq!(blocks[0], 0xFF);
    assert_eq!(blocks[1], 0x03);
    for byte in &blocks[2..] {
        assert_eq!(*byte, 0x00);
    }

    let inodes = read_inode_bitmap(&mut disk).unwrap();
    assert_eq!(inodes[0], 0x01);
    for byte in &inodes[1..] {
        assert_eq!(*byte, 0x00);
    }
}

#[test]
fn format_writes_a_well_formed_root_inode() {
    let mut disk = MemDisk::new();
    format(&mut disk).unwrap();

    let root = read_inode(&mut disk, ROOT_INODE).unwrap();
    assert_eq!(root.kind, InodeType::Directory);
    assert_eq!(root.n_references, 1);
    assert_eq!(root.size, 2);
    assert_eq!(root.data[0], 9);
    assert_eq!(root.blocks_in_use(), 1);
}
