use std::any::Any;
use std::panic;

use includefix::args::parse_args;
use includefix::progress;

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Quietly exit when downstream closes the pipe (e.g. piping to `head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

const USAGE: &str = "incfix - unused #include analyzer and rewriter for Qt/C++ trees\n\n\
Scans the project's headers once, indexes the framework's header namespace,\n\
then deletes include directives whose declared symbols are never referenced\n\
in the rest of the file. Files are rewritten in place, atomically per file.\n\n\
Usage: incfix [project-root] [options]\n\n\
Options:\n  \
  --qt <path>           Framework include tree (without it, framework\n                        \
includes resolve through the allow-list only)\n  \
  --dry-run, -n         Analyze and report, do not rewrite files\n  \
  --json                JSON report instead of human output\n  \
  --config <path>       Config file (default: <root>/.incfix/config.toml)\n  \
  --color[=mode]        Colorize output: auto|always|never (default auto)\n  \
  --verbose, -v         List every removed include per file\n  \
  --help, -h            Show this message\n  \
  --version, -V         Show version\n\n\
Includes with a trailing // comment are never touched - that is the\n\
human override. Unclassifiable includes are reported and kept.\n\n\
Examples:\n  \
  incfix                                  # clean up the current tree\n  \
  incfix src --qt /opt/qt/include         # explicit roots\n  \
  incfix src -n --verbose                 # preview the deletions\n  \
  incfix src --json > report.json         # CI-friendly output\n";

fn main() -> std::io::Result<()> {
    install_broken_pipe_handler();

    let parsed = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    if parsed.show_help {
        println!("{}", USAGE);
        return Ok(());
    }

    if parsed.show_version {
        println!("incfix {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if !parsed.root.is_dir() {
        let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
        eprintln!(
            "Root \"{}\" (cwd: {}) is not a directory",
            parsed.root.display(),
            cwd.display()
        );
        std::process::exit(1);
    }

    if let Err(err) = includefix::runner::run(&parsed) {
        progress::error(&format!("{err:#}"));
        std::process::exit(1);
    }

    Ok(())
}
