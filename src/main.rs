//! Kiln's main application entry point and orchestration logic.
//! Handles command-line argument parsing, the generation flow, and
//! coordinates interactions between the pipeline modules.

use kiln::{
    cli::{get_args, Args},
    error::{default_error_handler, Result},
    generator::{Generator, Seed},
    hooks::{CommandPackageManager, GenerationContext, GitVersionControl, run_hooks},
    processor::{ensure_output_dir, Processor},
    prompt::{AcceptDefaults, DialoguerPrompter, Prompter},
    renderer::MiniJinjaRenderer,
    resolver::{load_overrides_from_stdin, resolve},
    store::JsonFileStore,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves the absolute output directory from the project name
/// 2. Loads preloaded answers when running with --stdin
/// 3. Resolves the answer set (defaults, prompts, validation)
/// 4. Materializes the output tree (filter, rename, render, transform)
/// 5. Executes the post-generation hook sequence
fn run(args: Args) -> Result<()> {
    let base = std::env::current_dir()?;
    let output_root = ensure_output_dir(base.join(&args.name), args.force)?;
    println!("Generating project in {}", output_root.display());

    let seed = Seed::detect(&args.name);
    let generator = Generator::new(&seed);

    let (overrides, prompter): (serde_json::Value, Box<dyn Prompter>) = if args.stdin {
        // Preloaded answers bypass the interactive renderer entirely;
        // anything missing falls back to its default.
        (load_overrides_from_stdin()?, Box::new(AcceptDefaults))
    } else {
        (serde_json::Value::Null, Box::new(DialoguerPrompter::new()))
    };

    let mut store = JsonFileStore::open_default();
    let answers = resolve(generator.schema(), &overrides, &*prompter, &mut store)?;

    let engine = MiniJinjaRenderer::new();
    let processor =
        Processor::new(&engine, &args.template, &output_root, &answers, &generator);
    let created = processor.materialize()?;
    for path in &created {
        println!("created: {}", path.display());
    }

    if !args.skip_hooks {
        let vcs = GitVersionControl;
        let package_manager = CommandPackageManager;
        let ctx = GenerationContext {
            output_dir: output_root.clone(),
            answers: &answers,
            vcs: &vcs,
            package_manager: &package_manager,
        };
        let outcome = run_hooks(generator.hooks(), &ctx)?;
        for (hook, message) in &outcome.failed {
            eprintln!("warning: hook '{}' failed: {}", hook, message);
        }
    }

    println!("Project generated successfully in {}.", output_root.display());
    Ok(())
}
