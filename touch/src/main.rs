//! `touch` creates an empty file if it does not already exist.

use std::env;

use vdfs::ops;
use vdfscli::{run, usage};

fn main() {
    let prog = env::args().next().unwrap_or_else(|| "touch".to_string());
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 1 {
        usage(&prog, "<path>");
    }

    run(&prog, |disk, cwd| ops::touch(disk, cwd, &args[0]));
}
