use splitrun::{ExitStatus, splitrun_main};

fn main() -> ExitStatus {
    splitrun_main(|args| args)
}
