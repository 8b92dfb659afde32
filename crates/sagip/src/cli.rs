//! Clap derive structures for the `sagip` CLI.
//!
//! Defines the complete command tree, global flags, and shared argument
//! types. Kept free of workspace crates so `build.rs` can include it.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sagip -- evacuation centers, hazards, and incident reports from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "sagip",
    version,
    about = "Disaster-preparedness portal client for evacuation centers and hazard reports",
    long_about = "Browse evacuation centers and their capacity, barangay emergency\n\
        contacts, and hazard markers; submit incident reports; and get\n\
        walking directions to the nearest center.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides config)
    #[arg(long, short = 'b', env = "SAGIP_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SAGIP_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SAGIP_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "SAGIP_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Shared value types ───────────────────────────────────────────────

/// A `LAT,LON` pair given on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl FromStr for LatLon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LON, got '{s}'"))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|e| format!("invalid latitude '{}': {e}", lat.trim()))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|e| format!("invalid longitude '{}': {e}", lon.trim()))?;
        Ok(Self { lat, lon })
    }
}

/// Capacity status filter chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Capacity unknown
    NoData,
    /// At or over capacity
    Full,
    /// Little room left
    AlmostFull,
    /// Plenty of space
    Plenty,
}

/// Screening metric for `--near`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Great-circle distance
    Haversine,
    /// Flat degree approximation (111 km per degree)
    Planar,
}

/// Reporter-assessed severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeverityArg {
    Critical,
    Moderate,
    Minor,
}

/// One step of a scripted bottom-sheet gesture.
///
/// `down:Y`, `move:Y`, `frame`, `up`, `reset`, or `resize:WxH`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStep {
    Down(f64),
    Move(f64),
    Frame,
    Up,
    Reset,
    Resize { width: f64, height: f64 },
}

impl FromStr for GestureStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = s.split_once(':').unwrap_or((s, ""));
        let number = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid number '{raw}' in '{s}': {e}"))
        };
        match verb.trim().to_ascii_lowercase().as_str() {
            "down" => Ok(Self::Down(number(arg)?)),
            "move" => Ok(Self::Move(number(arg)?)),
            "frame" => Ok(Self::Frame),
            "up" => Ok(Self::Up),
            "reset" => Ok(Self::Reset),
            "resize" => {
                let (w, h) = arg
                    .split_once(['x', 'X'])
                    .ok_or_else(|| format!("expected resize:WxH, got '{s}'"))?;
                Ok(Self::Resize {
                    width: number(w)?,
                    height: number(h)?,
                })
            }
            other => Err(format!(
                "unknown gesture step '{other}' (expected down, move, frame, up, reset, resize)"
            )),
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse evacuation centers and their capacity
    #[command(alias = "c")]
    Centers(CentersArgs),

    /// List barangay emergency contacts
    Contacts(ContactsArgs),

    /// List hazard and facility markers
    #[command(alias = "hz")]
    Hazards(HazardsArgs),

    /// List the barangays the portal serves
    Barangays,

    /// Submit an incident report
    Report(ReportArgs),

    /// Walking directions to an evacuation center
    Route(RouteArgs),

    /// Reverse-geocode a coordinate pair
    Geocode(GeocodeArgs),

    /// Replay a drag gesture through the bottom-sheet controller
    Sheet(SheetArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Centers ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CentersArgs {
    #[command(subcommand)]
    pub command: CentersCommand,
}

#[derive(Debug, Subcommand)]
pub enum CentersCommand {
    /// List evacuation centers
    #[command(alias = "ls")]
    List(CenterListArgs),

    /// Show one evacuation center
    Get {
        /// Center ID
        id: String,
    },

    /// Centers near a location, nearest first
    Nearest {
        /// Your location as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        at: LatLon,

        /// Search radius in km (defaults to the configured radius)
        #[arg(long)]
        radius: Option<f64>,
    },
}

#[derive(Debug, Args)]
pub struct CenterListArgs {
    /// Case-insensitive name search
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Barangay name or slug ("all" for every barangay)
    #[arg(long)]
    pub barangay: Option<String>,

    /// Keep only these statuses (repeatable)
    #[arg(long, value_enum)]
    pub status: Vec<StatusArg>,

    /// Your location as LAT,LON; adds a distance column
    #[arg(long, allow_hyphen_values = true)]
    pub near: Option<LatLon>,

    /// Keep only centers within this many km of --near
    #[arg(long, requires = "near")]
    pub radius: Option<f64>,

    /// Metric used for the --radius screen
    #[arg(long, value_enum, default_value = "planar")]
    pub metric: MetricArg,

    /// Order by distance from --near
    #[arg(long, requires = "near")]
    pub sort_distance: bool,
}

// ── Contacts / hazards ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ContactsArgs {
    /// Show only this barangay (name or slug)
    #[arg(long)]
    pub barangay: Option<String>,
}

#[derive(Debug, Args)]
pub struct HazardsArgs {
    /// Only show these kinds (repeatable), e.g. Flood, FallenTree
    #[arg(long)]
    pub kind: Vec<String>,

    /// Show the evacuation-map risk layer (hazards only, no facilities)
    #[arg(long, conflicts_with = "kind")]
    pub risk_layer: bool,

    /// Skip reverse geocoding of markers without an address
    #[arg(long)]
    pub no_backfill: bool,
}

// ── Report ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Reporter name
    #[arg(long)]
    pub name: String,

    /// Mobile number in 63XXXXXXXXXX form
    #[arg(long)]
    pub phone: String,

    /// What happened
    #[arg(long, short = 'd')]
    pub description: String,

    /// Severity
    #[arg(long, value_enum)]
    pub severity: Option<SeverityArg>,

    /// Incident location as LAT,LON
    #[arg(long, allow_hyphen_values = true)]
    pub at: Option<LatLon>,

    /// Photo of the incident
    #[arg(long)]
    pub photo: Option<PathBuf>,

    /// Validate only; do not send
    #[arg(long)]
    pub dry_run: bool,
}

// ── Route / geocode ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RouteArgs {
    /// Starting point as LAT,LON
    #[arg(long, allow_hyphen_values = true)]
    pub from: LatLon,

    /// Destination evacuation center ID
    #[arg(long)]
    pub center: String,
}

#[derive(Debug, Args)]
pub struct GeocodeArgs {
    /// Location as LAT,LON
    #[arg(allow_hyphen_values = true)]
    pub at: LatLon,

    /// Print the compact report-form label instead of the place name
    #[arg(long)]
    pub label: bool,
}

// ── Sheet ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SheetArgs {
    /// Viewport width in px
    #[arg(long, default_value = "390")]
    pub width: f64,

    /// Viewport height in px
    #[arg(long, default_value = "844")]
    pub height: f64,

    /// Gesture steps: down:Y move:Y frame up reset resize:WxH
    #[arg(required = true, allow_hyphen_values = true)]
    pub steps: Vec<GestureStep>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a configuration value
    Set {
        /// Key, e.g. backend.url or display.almost_full_threshold
        key: String,
        /// New value
        value: String,
    },

    /// Store the OpenRouteService API key in the system keyring
    SetKey {
        /// The API key (prompted for when omitted)
        key: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
