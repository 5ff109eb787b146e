//! `inspect` lists the contents of a directory, or describes a single file,
//! defaulting to the current working directory (`$ZPWD`) when no path is
//! given.

use std::env;

use vdfs::inode::{read_inode, InodeType};
use vdfs::ops::{list, Listing};
use vdfscli::{run, usage};

fn main() {
    let prog = env::args().next().unwrap_or_else(|| "inspect".to_string());
    let rest: Vec<String> = env::args().skip(1).collect();
    if rest.len() > 1 {
        usage(&prog, "[path]");
    }
    let path = rest.into_iter().next().unwrap_or_else(|| ".".to_string());

    run(&prog, |disk, cwd| match list(disk, cwd, &path)? {
        Listing::File(name) => {
            println!("{name}");
            Ok(())
        }
        Listing::Directory(entries) => {
            for entry in &entries {
                // `.` and `..` are always printed bare; the directory-suffix
                // check only applies to a directory's actual children.
                let suffix = if entry.name == "." || entry.name == ".." {
                    ""
                } else {
                    let child = read_inode(disk, entry.inode_reference)?;
                    if child.kind == InodeType::Directory { "/" } else { "" }
                };
                println!("{}{suffix}", entry.name);
            }
            Ok(())
        }
    });
}
