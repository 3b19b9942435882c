use clap::Parser;
use nook::flags::Flags;
use nook::shell::Shell;

fn main() -> Result<(), nook::error::ShellError> {
    let flags = Flags::parse();
    flags.init_logging();

    let mut shell = Shell::new(&flags)?;
    shell.run()
}
