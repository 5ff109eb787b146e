//! On-disk layout constants.
//!
//! `INODES_PER_BLOCK` and `FILE_NAME_SIZE` are not the values named in the
//! original design note; see DESIGN.md for the derivation that fixes the
//! layout so `ROOT_DIRECTORY_BLOCK`, the golden bitmap bytes, the
//! `DirectoryFull` boundary and the two-block 300-byte scenario all hold at
//! once.

/// Bytes per block.
pub const BLOCK_SIZE: usize = 256;
/// Total number of blocks on the virtual disk.
pub const N_BLOCKS: usize = 128;
/// Total number of inodes.
pub const N_INODES: usize = 128;
/// Inodes packed into a single inode-table block.
pub const INODES_PER_BLOCK: usize = 16;
/// Direct block pointers per inode.
pub const BLOCKS_PER_INODE: usize = 9;
/// Directory entries packed into a single directory block.
pub const DIRECTORY_ENTRIES_PER_BLOCK: usize = 16;
/// Maximum length of a path component's name, NUL included.
pub const FILE_NAME_SIZE: usize = 15;
/// Maximum length of a path string accepted from the CLI.
pub const MAX_PATH_LENGTH: usize = 200;

/// Index of the master block.
pub const MASTER_BLOCK_REFERENCE: BlockRef = 0;
/// First block of the inode table.
pub const INODE_TABLE_START: BlockRef = 1;
/// Last block of the inode table, inclusive.
pub const INODE_TABLE_END: BlockRef = (N_INODES / INODES_PER_BLOCK) as BlockRef;
/// Block holding the root directory's entries.
pub const ROOT_DIRECTORY_BLOCK: BlockRef = INODE_TABLE_END + 1;
/// Inode reference of the root directory.
pub const ROOT_INODE: InodeRef = 0;

/// A block index. `N_BLOCKS_IN_DISK = 128` fits comfortably in a `u8`.
pub type BlockRef = u8;
/// An inode table index. `N_INODES = 128` fits comfortably in a `u8`.
pub type InodeRef = u8;

/// Sentinel meaning "no block".
pub const UNALLOCATED_BLOCK: BlockRef = BlockRef::MAX;
/// Sentinel meaning "no inode".
pub const UNALLOCATED_INODE: InodeRef = InodeRef::MAX;

/// Raw contents of one block.
pub type Block = [u8; BLOCK_SIZE];

/// A freshly zeroed block.
pub fn zeroed_block() -> Block {
    [0u8; BLOCK_SIZE]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inode_table_spans_expected_blocks() {
        assert_eq!(N_INODES / INODES_PER_BLOCK, 8);
        assert_eq!(INODE_TABLE_START, 1);
        assert_eq!(INODE_TABLE_END, 8);
        assert_eq!(ROOT_DIRECTORY_BLOCK, 9);
    }
}
