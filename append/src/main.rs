//! `append` writes standard input onto the end of an existing (or new)
//! file.

use std::env;
use std::io::{self, Read};

use vdfs::ops;
use vdfscli::{run, usage};

fn main() {
    let prog = env::args().next().unwrap_or_else(|| "append".to_string());
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 1 {
        usage(&prog, "<path>");
    }

    let mut input = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut input) {
        eprintln!("{prog}: cannot read standard input: {e}");
        std::process::exit(1);
    }

    run(&prog, |disk, cwd| {
        ops::append(disk, cwd, &args[0], &input).map(|_| ())
    });
}
