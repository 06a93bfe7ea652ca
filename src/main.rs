use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use folio::build::build_site;
use folio::config::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = app().get_matches();

    let result = match matches.subcommand() {
        ("build", Some(args)) => {
            init_tracing(args.is_present("verbose"));
            build(args)
        }
        _ => Ok(()),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn app() -> App<'static, 'static> {
    App::new("folio")
        .version(crate_version!())
        .about("Builds a static portfolio site")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("build")
                .about("Builds the site into the output directory")
                .arg(
                    Arg::with_name("PROJECT")
                        .help("The project directory (searched upwards for folio.yaml)")
                        .default_value(".")
                        .index(1),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("DIR")
                        .takes_value(true)
                        .help("The output directory [default: <project>/_output]"),
                )
                .arg(
                    Arg::with_name("verbose")
                        .short("v")
                        .long("verbose")
                        .help("Logs progress at INFO level"),
                ),
        )
}

// --verbose enables INFO, otherwise RUST_LOG decides (default WARN)
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build(args: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let project = Path::new(args.value_of("PROJECT").unwrap_or("."));
    let config = Config::from_directory(project, args.value_of("output").map(Path::new))?;
    build_site(&config)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn build_args(args: &[&str]) -> ArgMatches<'static> {
        let matches = app()
            .get_matches_from_safe(args.iter().copied())
            .unwrap();
        matches.subcommand_matches("build").unwrap().clone()
    }

    #[test]
    fn test_output_flag_at_project_root_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().to_str().unwrap();
        std::fs::write(
            dir.path().join("folio.yaml"),
            "site_root: https://example.org/\ntitle: Chris\n",
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("static")).unwrap();

        let err = build(&build_args(&["folio", "build", project, "-o", project])).unwrap_err();
        assert!(err.to_string().contains("overlaps source"));
        assert!(dir.path().join("static").is_dir());
    }

    #[test]
    fn test_output_flag_sets_output_directory() {
        let out = tempfile::tempdir().unwrap();
        let out_path = out.path().join("site");
        let out_arg = out_path.to_str().unwrap();

        build(&build_args(&["folio", "build", "testdata/site", "--output", out_arg])).unwrap();
        assert!(out_path.join("about").join("index.html").is_file());
        assert!(out_path.join("projects").join("index.html").is_file());
    }
}
