use bunki::prelude::*;
use clap::Parser;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Resolve gateway decisions and drive process definitions from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the process definition (JSON, or a compiled artifact with --artifact)
    definition_path: String,
    /// Optional path to the data context JSON file
    context_path: Option<String>,

    /// Element to resolve. Defaults to the start element
    #[arg(short, long)]
    element: Option<String>,

    /// Drive the whole process from its start element with a passthrough executor
    #[arg(long)]
    run: bool,

    /// Treat the definition path as a compiled binary artifact
    #[arg(long)]
    artifact: bool,

    /// Write the validated definition as a compiled binary artifact to this path
    #[arg(long, value_name = "PATH")]
    compile: Option<String>,

    /// Make relational operators on strings compare false instead of lexicographically
    #[arg(long)]
    reject_string_ordering: bool,

    /// Fetch referenced fields once into a projected context before evaluating
    #[arg(long)]
    project_fields: bool,

    /// Fail when a task's next link disagrees with its end flag
    #[arg(long)]
    strict_end_flags: bool,

    /// Maximum number of elements visited by --run
    #[arg(long, default_value_t = 1000)]
    max_steps: usize,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. Definition Loading ---
    let definition = if cli.artifact {
        CompiledProcess::from_file(&cli.definition_path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load artifact: {}", e)))
            .into_definition()
    } else {
        let json = fs::read_to_string(&cli.definition_path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to read definition file '{}': {}",
                &cli.definition_path, e
            ))
        });
        ProcessDefinition::from_json(&json)
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid process definition: {}", e)))
    };

    let context = match &cli.context_path {
        Some(path) => DataContext::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load data context: {}", e))),
        None => {
            println!("No data context file provided. Using an empty context.");
            DataContext::new()
        }
    };

    // --- 2. Engine Build ---
    let ordering = if cli.reject_string_ordering {
        StringOrdering::Reject
    } else {
        StringOrdering::Lexicographic
    };
    let engine = ProcessEngine::builder(definition)
        .with_string_ordering(ordering)
        .with_field_projection(cli.project_fields)
        .with_strict_end_flags(cli.strict_end_flags)
        .with_max_steps(cli.max_steps)
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid process definition: {}", e)));

    println!(
        "Loaded process '{}' with {} elements",
        engine.definition().name,
        engine.definition().elements.len()
    );

    if let Some(out) = &cli.compile {
        CompiledProcess::new(engine.definition().clone())
            .and_then(|compiled| compiled.save(out))
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write artifact: {}", e)));
        println!("  -> Wrote compiled artifact to '{}'", out);
    }

    // --- 3. Resolution ---
    if cli.run {
        run_process(&engine, context);
    } else {
        let element = match &cli.element {
            Some(name) => name.clone(),
            None => engine
                .start_element()
                .unwrap_or_else(|e| exit_with_error(&e.to_string()))
                .name
                .clone(),
        };
        resolve_element(&engine, &element, &context);
    }

    println!("\nTotal Execution: {:?}", total_start.elapsed());
}

fn resolve_element(engine: &ProcessEngine, element: &str, context: &DataContext) {
    let eval_start = Instant::now();
    let resolution = engine
        .resolve(element, context)
        .unwrap_or_else(|e| exit_with_error(&format!("Resolution failed: {}", e)));
    let eval_duration = eval_start.elapsed();

    println!("\nResolved '{}'", resolution.from);
    match resolution.next {
        Some(next) => println!("  -> Next element: {}", next),
        None => println!("  -> Branch ends here"),
    }
    if let Via::Gateway { outcome, trace } = &resolution.via {
        println!("  -> Condition outcome: {}", outcome);
        println!("  -> Reason: {}", TraceFormatter::format_trace(trace));
    }
    if let Some(warning) = &resolution.warning {
        println!("  -> Warning: {}", warning);
    }
    println!("Evaluation: {:?}", eval_duration);
}

fn run_process(engine: &ProcessEngine, context: DataContext) {
    let outcome = engine
        .run(context, &mut PassthroughExecutor)
        .unwrap_or_else(|e| exit_with_error(&format!("Run failed: {}", e)));

    println!("\nRun Finished!");
    println!("  -> Path: {}", outcome.visited.join(" -> "));
    if !outcome.patched_fields.is_empty() {
        println!("  -> Patched fields: {}", outcome.patched_fields.join(", "));
    }
    for warning in &outcome.warnings {
        println!("  -> Warning: {}", warning);
    }
    println!("  -> Final context: {}", outcome.context.to_json());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
