//! Path resolution: turning a path string plus a starting directory into
//! the inode pair an operation needs to act on.

use crate::device::BlockDevice;
use crate::directory::find_entry;
use crate::error::{Error, Result};
use crate::inode::{read_inode, InodeType};
use crate::layout::{InodeRef, ROOT_INODE, UNALLOCATED_INODE};

/// The result of resolving a path: the inode of the directory that holds
/// (or would hold) the final component, the inode the final component
/// currently refers to (`UNALLOCATED_INODE` if it does not exist), and the
/// final component's own name.
pub struct Resolved {
    pub parent: InodeRef,
    pub child: InodeRef,
    pub name: String,
}

fn components(path: &str) -> Vec<&str> {
    path.split('/').filter(|c| !c.is_empty()).collect()
}

fn child_of(dev: &mut dyn BlockDevice, dir: InodeRef, name: &str) -> Result<InodeRef> {
    let inode = read_inode(dev, dir)?;
    if inode.kind != InodeType::Directory {
        return Err(Error::NotADirectory);
    }
    find_entry(dev, inode.data[0], name)
}

/// Resolves `path` starting from `start` (used as the current directory
/// when `path` is relative; ignored, in favor of the root, when `path` is
/// absolute).
///
/// Every non-final component must already name an existing directory, or
/// this returns `PathNotFound`/`NotADirectory`. The final component is not
/// required to exist: callers that need it to (e.g. `rmdir`, `open` for
/// reading) check `child != UNALLOCATED_INODE` themselves, and callers that
/// are creating it (e.g. `mkdir`, `open` for writing) check the opposite.
///
/// A path of `"/"` or `""` resolves to the root directory with itself as
/// both parent and child, and `"."` as its name.
pub fn resolve_from(dev: &mut dyn BlockDevice, start: InodeRef, path: &str) -> Result<Resolved> {
    let mut current = if path.starts_with('/') { ROOT_INODE } else { start };
    let parts = components(path);

    if parts.is_empty() {
        return Ok(Resolved {
            parent: current,
            child: current,
            name: ".".to_string(),
        });
    }

    for part in &parts[..parts.len() - 1] {
        let next = child_of(dev, current, part)?;
        if next == UNALLOCATED_INODE {
            return Err(Error::PathNotFound);
        }
        current = next;
    }

    let name = parts[parts.len() - 1].to_string();
    let child = child_of(dev, current, &name)?;
    Ok(Resolved {
        parent: current,
        child,
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::MemDisk;
    use crate::directory::{clean_directory_block, insert_entry};
    use crate::inode::{write_inode, Inode};
    use crate::layout::ROOT_DIRECTORY_BLOCK;

    fn make_root(disk: &mut MemDisk) {
        let mut root = Inode::cleared();
        root.kind = InodeType::Directory;
        root.n_references = 1;
        root.data[0] = ROOT_DIRECTORY_BLOCK;
        write_inode(disk, ROOT_INODE, &root).unwrap();
        clean_directory_block(disk, ROOT_DIRECTORY_BLOCK, ROOT_INODE, ROOT_INODE).unwrap();
    }

    #[test]
    fn root_path_resolves_to_itself() {
        let mut disk = MemDisk::new();
        make_root(&mut disk);

        let resolved = resolve_from(&mut disk, ROOT_INODE, "/").unwrap();
        assert_eq!(resolved.parent, ROOT_INODE);
        assert_eq!(resolved.child, ROOT_INODE);
    }

    #[test]
    fn missing_intermediate_component_is_not_found() {
        let mut disk = MemDisk::new();
        make_root(&mut disk);

        assert!(matches!(
            resolve_from(&mut disk, ROOT_INODE, "/nope/child"),
            Err(Error::PathNotFound)
        ));
    }

    #[test]
    fn existing_intermediate_not_a_directory_is_rejected() {
        let mut disk = MemDisk::new();
        make_root(&mut disk);

        let mut file = Inode::cleared();
        file.kind = InodeType::File;
        file.n_references = 1;
        write_inode(&mut disk, 1, &file).unwrap();
        insert_entry(&mut disk, ROOT_DIRECTORY_BLOCK, "plain", 1).unwrap();

        assert!(matches!(
            resolve_from(&mut disk, ROOT_INODE, "/plain/child"),
            Err(Error::NotADirectory)
        ));
    }

    #[test]
    fn final_component_may_be_unallocated() {
        let mut disk = MemDisk::new();
        make_root(&mut disk);

        let resolved = resolve_from(&mut disk, ROOT_INODE, "/fresh").unwrap();
        assert_eq!(resolved.parent, ROOT_INODE);
        assert_eq!(resolved.child, UNALLOCATED_INODE);
        assert_eq!(resolved.name, "fresh");
    }

    #[test]
    fn relative_paths_resolve_against_the_given_start() {
        let mut disk = MemDisk::new();
        make_root(&mut disk);

        let mut sub = Inode::cleared();
        sub.kind = InodeType::Directory;
        sub.n_references = 1;
        sub.data[0] = 10;
        write_inode(&mut disk, 1, &sub).unwrap();
        insert_entry(&mut disk, ROOT_DIRECTORY_BLOCK, "sub", 1).unwrap();
        clean_directory_block(&mut disk, 10, 1, ROOT_INODE).unwrap();
        insert_entry(&mut disk, 10, "leaf", 2).unwrap();

        let resolved = resolve_from(&mut disk, 1, "leaf").unwrap();
        assert_eq!(resolved.parent, 1);
        assert_eq!(resolved.child, 2);
    }
}
