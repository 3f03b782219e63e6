/// glmx terminal inspector
///
/// Usage: glmx-terminal [--config stack.toml] [script]
///
/// Reads matrix commands from `script` (or stdin), runs them against a
/// fresh matrix context and prints whatever `Print` / `Project` ask for.

use std::env;
use std::io::{self, stdout};

use glmx_core::StackConfig;
use glmx_terminal::{load_script, parse_script, Inspector};

fn main() -> io::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let mut config = StackConfig::default();
    let mut script_path = None;

    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args.next().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "--config needs a path")
            })?;
            config = StackConfig::load_from_file(&path).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Failed to load config: {}", e),
                )
            })?;
        } else {
            script_path = Some(arg);
        }
    }

    let source = load_script(script_path.as_deref())?;

    let commands = parse_script(&source)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let mut inspector = Inspector::new(config);
    inspector.run(&commands, &mut stdout())?;

    if !inspector.errors().is_empty() {
        eprintln!("{} GL error(s) reported", inspector.errors().len());
    }
    Ok(())
}
