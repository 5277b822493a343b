mod logging;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use novaflow_assistant::{AssistantPanel, EchoAssistant, Role};
use novaflow_catalog::{
    demo_catalog, module_label, CatalogQuery, ModuleId, ResourceCatalog, ResourceKind,
    ResourceNode, StaticCatalog,
};
use novaflow_settings::PreferencesStore;
use novaflow_workspace::{Gesture, InteractionController};

use crate::logging::Verbosity;

#[derive(Parser)]
#[command(
    name = "novaflow-cli",
    about = "Inspect NovaFlow catalogs and replay workspace sessions",
    author,
    version
)]
struct Cli {
    /// 工作區根目錄，偏好設定位於 `.novaflow/`。 / Workspace root holding `.novaflow/` (defaults to current directory).
    #[arg(long, global = true, value_name = "PATH")]
    workspace: Option<PathBuf>,

    /// JSON 資源目錄；預設使用內建示範資料。 / JSON catalog to use instead of the built-in demo catalog.
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Debug-level logs on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Errors only.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 列出目錄中的模組。 / List the modules of the catalog.
    Modules,
    /// 顯示模組的資源樹。 / Print a module's resource tree, optionally filtered.
    Tree(TreeArgs),
    /// 重播手勢腳本並輸出快照。 / Replay a gesture script and print the resulting snapshot.
    Replay(ReplayArgs),
    /// 輸出新工作階段的快照。 / Print the snapshot of a fresh session.
    Snapshot,
    /// 向助理送出一則提示。 / Send one prompt through the assistant panel (offline echo service).
    Ask(AskArgs),
    /// 匯入/匯出偏好設定。 / Import or export preferences.
    #[command(subcommand)]
    Preferences(PreferencesCommand),
}

#[derive(Args)]
struct TreeArgs {
    /// Module id, e.g. `pages` or `finance_center`.
    module: String,

    /// Case-insensitive match on name or code.
    #[arg(long)]
    query: Option<String>,

    /// Keep only these resource kinds (repeatable).
    #[arg(long = "kind", value_name = "KIND")]
    kinds: Vec<ResourceKind>,

    /// Print JSON instead of an indented outline.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ReplayArgs {
    /// JSON array of gestures.
    #[arg(value_name = "FILE")]
    script: PathBuf,

    /// Print the resolved content pane after the snapshot.
    #[arg(long)]
    content: bool,
}

#[derive(Args)]
struct AskArgs {
    prompt: String,
}

#[derive(Subcommand)]
enum PreferencesCommand {
    /// 顯示目前偏好設定。 / Print the effective preferences.
    Show,
    /// 匯出目前偏好設定。 / Export current preferences.
    Export(PreferencesExportArgs),
    /// 匯入偏好設定 JSON。 / Import preferences from JSON.
    Import(PreferencesImportArgs),
}

#[derive(Args)]
struct PreferencesExportArgs {
    /// 輸出檔案路徑。 / Destination file path.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
}

#[derive(Args)]
struct PreferencesImportArgs {
    /// 輸入檔案路徑。 / Source preferences JSON.
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet));

    let workspace_root = resolve_workspace(cli.workspace)?;
    match cli.command {
        Commands::Modules => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            for module in catalog.modules() {
                println!("{module}\t{}", module_label(module.as_str()));
            }
            Ok(())
        }
        Commands::Tree(args) => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            execute_tree(&catalog, args)
        }
        Commands::Replay(args) => execute_replay(args, &workspace_root),
        Commands::Snapshot => {
            let session = open_session(&workspace_root)?;
            println!("{}", session.snapshot().to_json_pretty()?);
            Ok(())
        }
        Commands::Ask(args) => execute_ask(args),
        Commands::Preferences(subcommand) => {
            execute_preferences_command(subcommand, &workspace_root)
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<StaticCatalog> {
    match path {
        Some(path) => {
            let path = resolve_input_path(path)?;
            StaticCatalog::load(&path)
                .with_context(|| format!("failed to load catalog {}", path.display()))
        }
        None => demo_catalog().context("failed to build demo catalog"),
    }
}

fn execute_tree(catalog: &StaticCatalog, args: TreeArgs) -> Result<()> {
    let module = ModuleId::new(args.module);
    catalog
        .get_tree(&module)
        .with_context(|| format!("cannot show module `{module}`"))?;

    let query = CatalogQuery::text(args.query.unwrap_or_default())
        .with_kinds(args.kinds);
    let tree = catalog.search_filtered(&module, &query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }
    if tree.is_empty() {
        println!("No matching resources in {}", module_label(module.as_str()));
        return Ok(());
    }
    println!("{}", module_label(module.as_str()));
    let mut outline = String::new();
    write_outline(&tree, 1, &mut outline);
    print!("{outline}");
    Ok(())
}

fn write_outline(nodes: &[ResourceNode], depth: usize, out: &mut String) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        if node.is_folder() {
            out.push_str(&format!("{indent}{}/\n", node.name));
            write_outline(&node.children, depth + 1, out);
        } else if node.code.is_empty() {
            out.push_str(&format!("{indent}{} [{}]\n", node.name, node.kind));
        } else {
            out.push_str(&format!(
                "{indent}{} [{}] {}\n",
                node.name, node.kind, node.code
            ));
        }
    }
}

fn execute_replay(args: ReplayArgs, workspace_root: &Path) -> Result<()> {
    let script_path = resolve_input_path(&args.script)?;
    if !script_path.exists() {
        bail!("gesture script {} does not exist", script_path.display());
    }
    let contents = fs::read_to_string(&script_path)
        .with_context(|| format!("failed to read {}", script_path.display()))?;
    let gestures: Vec<Gesture> = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse gestures in {}", script_path.display()))?;

    let mut session = open_session(workspace_root)?;
    tracing::debug!(count = gestures.len(), "replaying gestures");
    session.dispatch_all(gestures);

    println!("{}", session.snapshot().to_json_pretty()?);
    if args.content {
        println!("{}", serde_json::to_string_pretty(&session.content_view())?);
    }
    Ok(())
}

fn execute_ask(args: AskArgs) -> Result<()> {
    let mut panel = AssistantPanel::new();
    panel.send(&EchoAssistant, &args.prompt)?;
    for message in panel.messages() {
        let speaker = match message.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        println!("{speaker}: {}", message.text);
    }
    Ok(())
}

fn open_session(workspace_root: &Path) -> Result<InteractionController> {
    let prefs_path = preferences_path(workspace_root);
    let store = PreferencesStore::load(&prefs_path)
        .with_context(|| format!("failed to load preferences from {}", prefs_path.display()))?;
    Ok(InteractionController::new(
        store.preferences().to_workspace_config(),
    ))
}

fn execute_preferences_command(command: PreferencesCommand, workspace_root: &Path) -> Result<()> {
    let prefs_path = preferences_path(workspace_root);
    let mut store = PreferencesStore::load(&prefs_path)
        .with_context(|| format!("failed to load preferences from {}", prefs_path.display()))?;
    match command {
        PreferencesCommand::Show => {
            println!("{}", serde_json::to_string_pretty(store.preferences())?);
        }
        PreferencesCommand::Export(args) => {
            let output = resolve_input_path(&args.output)?;
            store
                .export_to(&output)
                .with_context(|| format!("failed to export preferences to {}", output.display()))?;
            println!("Exported preferences to {}", output.display());
        }
        PreferencesCommand::Import(args) => {
            let input = resolve_input_path(&args.input)?;
            if !input.exists() {
                bail!("preferences file {} does not exist", input.display());
            }
            store
                .import_from(&input)
                .with_context(|| format!("failed to import preferences from {}", input.display()))?;
            println!("Imported preferences into {}", store.path().display());
        }
    }
    Ok(())
}

fn preferences_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(".novaflow").join("preferences.json")
}

fn resolve_workspace(workspace: Option<PathBuf>) -> Result<PathBuf> {
    match workspace {
        Some(path) => resolve_input_path(&path),
        None => std::env::current_dir().context("determine current directory"),
    }
}

fn resolve_input_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()
            .context("determine current directory")?
            .join(path))
    }
}
