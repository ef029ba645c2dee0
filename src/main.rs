//! Pass Forge - password mutation and wordlist generation
//!
//! Reads seed words from files or stdin, mutates them and writes the
//! resulting wordlist to stdout or a file.

use std::env;
use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use pass_forge::{
    wordlist, MutationConfig, MutationLevel, PassForgeError, Pipeline, RecipeMode, Result,
    WordlistStats,
};

/// Default range for `--years` given without a value
const DEFAULT_YEARS: &str = "1980-current";

/// Where common words come from
#[derive(Debug, Clone, PartialEq, Eq)]
enum CommonSource {
    Builtin,
    File(PathBuf),
}

/// Parsed command line
#[derive(Debug, Default)]
struct Cli {
    inputs: Vec<String>,
    output: Option<PathBuf>,
    config: MutationConfig,
    threads: Option<usize>,
    separator: Option<String>,
    common: Option<CommonSource>,
    exclude_common: Option<PathBuf>,
    rules: Option<String>,
    strict_rules: bool,
    analyze: bool,
    check_updates: bool,
    show_version: bool,
    help: bool,
    verbose: bool,
}

/// Value following a flag, or the `=value` part
fn take_value(args: &[String], i: &mut usize, flag: &str, inline: Option<&str>) -> Result<String> {
    if let Some(value) = inline {
        return Ok(value.to_string());
    }
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| PassForgeError::cli(format!("flag '{}' needs a value", flag)))
}

/// Value following a flag only if the next argument is not another flag
fn take_optional(args: &[String], i: &mut usize, inline: Option<&str>) -> Option<String> {
    if let Some(value) = inline {
        return Some(value.to_string());
    }
    match args.get(*i + 1) {
        Some(next) if !next.starts_with('-') => {
            *i += 1;
            Some(next.clone())
        }
        _ => None,
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| PassForgeError::cli(format!("flag '{}' expects a number, got '{}'", flag, value)))
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(|s| s.to_string()).collect()
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        let mut cli = Cli::default();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            if !arg.starts_with('-') || arg == "-" {
                cli.inputs.push(arg.clone());
                i += 1;
                continue;
            }

            let body = arg.trim_start_matches('-');
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            let config = &mut cli.config;

            match name {
                "f" | "file" => cli.inputs.push(take_value(args, &mut i, arg, inline)?),
                "o" | "output" => {
                    let value = take_value(args, &mut i, arg, inline)?;
                    cli.output = (value != "-").then(|| PathBuf::from(value));
                }
                "m" | "min" => config.min_length = parse_number(arg, &take_value(args, &mut i, arg, inline)?)?,
                "x" | "max" => config.max_length = parse_number(arg, &take_value(args, &mut i, arg, inline)?)?,
                "p" | "perms" => config.perms = true,
                "d" | "double" => config.double = true,
                "r" | "reverse" => config.reverse = true,
                "t" | "leet" => config.leet = true,
                "T" | "full-leet" => config.full_leet = true,
                "ac" | "all-cases" => config.all_cases = true,
                "c" | "capital" => config.capital = true,
                "u" | "upper" => config.upper = true,
                "l" | "lower" => config.lower = true,
                "s" | "swap" => config.swap = true,
                "ps" | "prefix-strings" => {
                    config.prefix_strings = split_list(&take_value(args, &mut i, arg, inline)?)
                }
                "ss" | "suffix-strings" => {
                    config.suffix_strings = split_list(&take_value(args, &mut i, arg, inline)?)
                }
                "punctuation" => config.punctuation = true,
                "y" | "years" => {
                    config.years_range = Some(
                        take_optional(args, &mut i, inline).unwrap_or_else(|| DEFAULT_YEARS.to_string()),
                    )
                }
                "A" | "acronym" => config.acronym = true,
                "C" | "common" => {
                    cli.common = Some(match take_optional(args, &mut i, inline) {
                        Some(path) => CommonSource::File(PathBuf::from(path)),
                        None => CommonSource::Builtin,
                    })
                }
                "pr" | "prefix-range" => config.prefix_range = Some(take_value(args, &mut i, arg, inline)?),
                "sr" | "suffix-range" => config.suffix_range = Some(take_value(args, &mut i, arg, inline)?),
                "space" => config.space = true,
                "a" | "analyze" => cli.analyze = true,
                "cr" | "crunch" => config.crunch_mask = Some(take_value(args, &mut i, arg, inline)?),
                "S" | "sort" => config.sort_mode = take_value(args, &mut i, arg, inline)?.parse()?,
                "L" | "level" => {
                    let level: u8 = parse_number(arg, &take_value(args, &mut i, arg, inline)?)?;
                    config.mutation_level = MutationLevel::try_from(level)?;
                }
                "ms" | "min-strength" => {
                    config.min_strength = parse_number(arg, &take_value(args, &mut i, arg, inline)?)?
                }
                "pp" | "passphrase" => {
                    config.passphrase_count = parse_number(arg, &take_value(args, &mut i, arg, inline)?)?
                }
                "sep" => cli.separator = Some(take_value(args, &mut i, arg, inline)?),
                "seed" => {
                    config.passphrase_seed = Some(parse_number(arg, &take_value(args, &mut i, arg, inline)?)?)
                }
                "no-numbers" => config.no_numbers = true,
                "no-symbols" => config.no_symbols = true,
                "no-capitals" => config.no_capitals = true,
                "n" | "threads" => cli.threads = Some(parse_number(arg, &take_value(args, &mut i, arg, inline)?)?),
                "rules" => cli.rules = Some(take_value(args, &mut i, arg, inline)?),
                "strict-rules" => cli.strict_rules = true,
                "exclude-common" => {
                    cli.exclude_common = Some(PathBuf::from(take_value(args, &mut i, arg, inline)?))
                }
                "check-updates" => cli.check_updates = true,
                "v" | "version" => cli.show_version = true,
                "verbose" => cli.verbose = true,
                "h" | "help" | "hl" | "long-help" => cli.help = true,
                _ => return Err(PassForgeError::cli(format!("unknown flag '{}'", arg))),
            }
            i += 1;
        }

        Ok(cli)
    }

    /// Resolve the final run config: defaults, then environment, then flags
    fn into_config(self) -> Result<(MutationConfig, RunTarget)> {
        let mut config = self.config;
        config.apply_env();

        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(separator) = self.separator {
            config.passphrase_separator = separator;
        }
        if let Some(rules) = &self.rules {
            config.custom_recipe = split_list(rules)
                .into_iter()
                .filter(|step| !step.trim().is_empty())
                .collect();
        }
        if self.strict_rules {
            config.recipe_mode = RecipeMode::Strict;
        }

        if let Some(common) = &self.common {
            let path = match common {
                CommonSource::Builtin => None,
                CommonSource::File(path) => Some(path.as_path()),
            };
            config.common_words = wordlist::load_common_words(path)?;
        }

        if let Some(path) = &self.exclude_common {
            config = config.with_blacklist(wordlist::load_blacklist(path)?);
        }

        let target = RunTarget {
            inputs: self.inputs.join(","),
            output: self.output,
        };
        Ok((config, target))
    }
}

/// Input and output locations for a run
struct RunTarget {
    inputs: String,
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize the library
    if let Err(e) = pass_forge::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() && io::stdin().is_terminal() {
        print_help();
        return;
    }

    let cli = match Cli::parse(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e.user_message());
            process::exit(2);
        }
    };

    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<PassForgeError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("❌ Error: {:#}", e),
        }
        process::exit(1);
    }
}

/// Install the stderr log subscriber; stdout may carry the wordlist
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("pass-forge v{}", pass_forge::VERSION);
        return Ok(());
    }

    if cli.check_updates {
        return check_updates().await;
    }

    let analyze = cli.analyze;
    let (config, target) = cli.into_config()?;

    let stdin = io::stdin();
    let sources = wordlist::skip_interactive_stdin(
        wordlist::parse_inputs(&target.inputs),
        stdin.is_terminal(),
    );
    let words = wordlist::load_inputs(&sources, stdin.lock());
    if words.is_empty() {
        return Err(PassForgeError::input("no words loaded from input").into());
    }

    if analyze {
        println!("{}", WordlistStats::analyze(&words)?);
        return Ok(());
    }

    let pipeline = Pipeline::new(config)?;

    let (writer, spinner): (Box<dyn Write + Send>, Option<ProgressBar>) = match &target.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| PassForgeError::io(e.to_string(), Some(path.display().to_string())))?;
            (Box::new(file), Some(start_spinner(&pipeline)))
        }
        None => (Box::new(io::stdout()), None),
    };

    let output = pipeline.run(words, writer).await?;

    if let Some(spinner) = spinner {
        spinner.finish_with_message(format!(
            "✅ {} candidates written ({} filtered, {} duplicates)",
            output.metrics.emitted, output.metrics.rejected, output.metrics.duplicates
        ));
    }
    tracing::debug!(
        submitted = output.metrics.submitted,
        acceptance = output.metrics.acceptance_rate(),
        "Run summary"
    );

    Ok(())
}

/// Spinner on stderr that tracks the emitted count
fn start_spinner(pipeline: &Pipeline) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(120));

    let metrics = pipeline.metrics();
    let progress = spinner.clone();
    tokio::spawn(async move {
        while !progress.is_finished() {
            progress.set_message(format!("🔨 {} candidates", metrics.emitted()));
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    });

    spinner
}

#[cfg(feature = "update-check")]
async fn check_updates() -> anyhow::Result<()> {
    use pass_forge::update::{check_for_updates, UpdateStatus};

    match check_for_updates().await? {
        UpdateStatus::UpToDate => println!("You are using the latest version."),
        UpdateStatus::Available { latest } => println!("A new version ({}) is available.", latest),
    }
    Ok(())
}

#[cfg(not(feature = "update-check"))]
async fn check_updates() -> anyhow::Result<()> {
    anyhow::bail!("this build was compiled without the update-check feature")
}

/// Print help information
fn print_help() {
    println!("🔨 Pass Forge v{} - password mutation and wordlist generation", pass_forge::VERSION);
    println!("═══════════════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    pass-forge -f words.txt [OPTIONS]");
    println!("    cat words.txt | pass-forge [OPTIONS]");
    println!();
    println!("INPUT / OUTPUT:");
    println!("    -f, --file <list>          Input files, comma separated, globs allowed, '-' for stdin");
    println!("    -o, --output <file>        Output file (default: stdout)");
    println!("    -a, --analyze              Print statistics about the input and exit");
    println!();
    println!("MUTATIONS:");
    println!("    -p, --perms                Permute the input words");
    println!("        --space                Join permutations with a space");
    println!("    -d, --double               Double each word");
    println!("    -r, --reverse              Reverse each word");
    println!("    -t, --leet                 Simple leet substitutions");
    println!("    -T, --full-leet            Every leet combination");
    println!("    -ac, --all-cases           Every upper/lower case combination");
    println!("    -c, --capital              Capitalize");
    println!("    -u, --upper                Uppercase");
    println!("    -l, --lower                Lowercase");
    println!("    -s, --swap                 Swap case");
    println!("    -ps, --prefix-strings <l>  Literal prefixes, comma separated");
    println!("    -ss, --suffix-strings <l>  Literal suffixes, comma separated");
    println!("        --punctuation          Append each of !@$%^&*()");
    println!("    -y, --years [range]        Year prefixes and suffixes (default {})", DEFAULT_YEARS);
    println!("    -pr, --prefix-range <r>    Numeric prefixes, e.g. 0-99");
    println!("    -sr, --suffix-range <r>    Numeric suffixes, e.g. 00-99");
    println!("    -A, --acronym              Add the acronym of the input words");
    println!("    -C, --common [file]        Common words as affixes (built-in list without a file)");
    println!("    -L, --level <0-2>          2 chains two mutation passes");
    println!("        --rules <steps>        Ordered recipe, e.g. reverse,upper,leet");
    println!("        --strict-rules         Reject unknown recipe steps");
    println!();
    println!("FILTERS:");
    println!("    -m, --min <n>              Minimum length");
    println!("    -x, --max <n>              Maximum length");
    println!("    -cr, --crunch <mask>       Crunch mask: . any, # digit, ^ upper, % lower, & symbol");
    println!("    -ms <0-4>                  Minimum strength score");
    println!("        --no-numbers           Drop candidates with digits");
    println!("        --no-symbols           Drop candidates with symbols");
    println!("        --no-capitals          Drop candidates with capitals");
    println!("        --exclude-common <f>   Drop candidates listed in a file");
    println!();
    println!("OUTPUT ORDER / PASSPHRASES:");
    println!("    -S, --sort <a|e>           Sort alphabetically or by efficacy");
    println!("    -pp <n>                    Build passphrases of n mutated words");
    println!("        --sep <s>              Passphrase separator (default '-')");
    println!("        --seed <n>             Seed for passphrase sampling");
    println!();
    println!("OTHER:");
    println!("    -n, --threads <n>          Worker count (default: CPU count)");
    println!("        --check-updates        Check for a newer release");
    println!("        --verbose              Debug logging on stderr");
    println!("    -v, --version              Print version");
    println!("    -h, --help                 Print this help");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    PASS_FORGE_THREADS         Default worker count");
    println!("    PASS_FORGE_SEPARATOR       Default passphrase separator");
    println!("    RUST_LOG                   Log filter (default: warn)");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse(&args(&["-f", "words.txt", "-r", "--upper", "-m", "4", "-S", "e"])).unwrap();
        assert_eq!(cli.inputs, vec!["words.txt"]);
        assert!(cli.config.reverse);
        assert!(cli.config.upper);
        assert_eq!(cli.config.min_length, 4);
        assert_eq!(cli.config.sort_mode, pass_forge::SortMode::Efficacy);
    }

    #[test]
    fn test_optional_values() {
        let cli = Cli::parse(&args(&["-y", "-C", "-r"])).unwrap();
        assert_eq!(cli.config.years_range.as_deref(), Some(DEFAULT_YEARS));
        assert_eq!(cli.common, Some(CommonSource::Builtin));

        let cli = Cli::parse(&args(&["--years=2000-2005", "-C", "common.txt"])).unwrap();
        assert_eq!(cli.config.years_range.as_deref(), Some("2000-2005"));
        assert_eq!(cli.common, Some(CommonSource::File(PathBuf::from("common.txt"))));
    }

    #[test]
    fn test_bad_values() {
        assert!(Cli::parse(&args(&["-m", "four"])).is_err());
        assert!(Cli::parse(&args(&["-L", "3"])).is_err());
        assert!(Cli::parse(&args(&["--bogus"])).is_err());
        assert!(Cli::parse(&args(&["-o"])).is_err());
    }
}
