use chrono::{DateTime, Local, NaiveTime, Utc};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use sourdough_core::{BlendComponent, FeedingRatio, FlourType, PrefermentKind, StarterStrength};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sourdough",
    about = "Baker's percentage, levain, fermentation and starter calculators.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Load a kitchen profile JSON before applying CLI flags
    #[arg(long, global = true)]
    pub profile: Option<PathBuf>,

    /// Save the effective kitchen profile to JSON
    #[arg(long, global = true)]
    pub save_profile: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Baker's percentages to gram weights
    Percent(PercentArgs),
    /// Hydration from weights, or the weight needed for a target hydration
    Hydration(HydrationArgs),
    /// Split a levain into its flour and water
    Levain(LevainArgs),
    /// Build a starter feeding for a recipe
    Feed(FeedArgs),
    /// Poolish / biga / pâte fermentée composition
    Preferment(PrefermentArgs),
    /// Flour-blend protein, or solve a two-flour blend for a target
    Blend(BlendArgs),
    /// Bulk fermentation time estimate
    Bulk(BulkArgs),
    /// Water temperature for a desired dough temperature (°F)
    Ddt(DdtArgs),
    /// Scale gram amounts to a new yield
    Scale(ScaleArgs),
    /// Pre-bake vs post-bake dough weight
    BakeLoss(BakeLossArgs),
    /// Starter feeding schedule and health
    Starter(StarterArgs),
}

/// Preferment kind (mirrors sourdough-core for Clap).
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum KindFlag {
    Poolish,
    Biga,
    PateFermentee,
}

impl From<KindFlag> for PrefermentKind {
    fn from(k: KindFlag) -> Self {
        match k {
            KindFlag::Poolish => PrefermentKind::Poolish,
            KindFlag::Biga => PrefermentKind::Biga,
            KindFlag::PateFermentee => PrefermentKind::PateFermentee,
        }
    }
}

/// Starter strength (mirrors sourdough-core for Clap).
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum StrengthFlag {
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl From<StrengthFlag> for StarterStrength {
    fn from(s: StrengthFlag) -> Self {
        match s {
            StrengthFlag::Weak => StarterStrength::Weak,
            StrengthFlag::Moderate => StarterStrength::Moderate,
            StrengthFlag::Strong => StarterStrength::Strong,
            StrengthFlag::VeryStrong => StarterStrength::VeryStrong,
        }
    }
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("size")
        .args(["flour", "dough_weight"])
        .required(true)
))]
pub struct PercentArgs {
    /// Flour weight in grams (the 100% reference)
    #[arg(long)]
    pub flour: Option<f64>,

    /// Size the flour so the whole dough weighs this many grams
    #[arg(long)]
    pub dough_weight: Option<f64>,

    /// Water, % of flour
    #[arg(long, default_value_t = 70.0)]
    pub water: f64,

    /// Salt, % of flour
    #[arg(long, default_value_t = 2.0)]
    pub salt: f64,

    /// Starter, % of flour
    #[arg(long, default_value_t = 20.0)]
    pub starter: f64,

    /// Starter hydration, for the overall-hydration line
    #[arg(long)]
    pub starter_hydration: Option<f64>,

    /// Extra ingredient as NAME=PERCENT (repeatable)
    #[arg(long = "add", value_parser = parse_named_amount)]
    pub additions: Vec<(String, f64)>,
}

#[derive(Args, Debug)]
pub struct HydrationArgs {
    /// Flour weight in grams
    #[arg(long)]
    pub flour: Option<f64>,

    /// Water weight in grams
    #[arg(long)]
    pub water: Option<f64>,

    /// Target hydration, %
    #[arg(long)]
    pub target: Option<f64>,
}

#[derive(Args, Debug)]
pub struct LevainArgs {
    /// Levain mass in grams
    #[arg(long)]
    pub mass: f64,

    /// Levain hydration, % (profile or 100 when omitted)
    #[arg(long)]
    pub hydration: Option<f64>,
}

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Starter the recipe needs, grams
    #[arg(long)]
    pub need: f64,

    /// Starter currently in the jar, grams
    #[arg(long, default_value_t = 0.0)]
    pub current: f64,

    /// Feeding ratio S:F:W (profile or 1:1:1 when omitted)
    #[arg(long)]
    pub ratio: Option<FeedingRatio>,
}

#[derive(Args, Debug)]
pub struct PrefermentArgs {
    /// Total flour in the recipe, grams
    #[arg(long)]
    pub flour: f64,

    /// Share of the flour that goes into the preferment, %
    #[arg(long)]
    pub percent: f64,

    #[arg(long, value_enum, default_value_t = KindFlag::Poolish)]
    pub kind: KindFlag,
}

#[derive(Args, Debug)]
pub struct BlendArgs {
    /// Blend component PERCENT:PROTEIN, protein as a number or flour name (repeatable)
    #[arg(long = "component", value_parser = parse_component)]
    pub components: Vec<BlendComponent>,

    /// Target protein % for a two-flour blend
    #[arg(long, requires_all = ["flour_a", "flour_b"], conflicts_with = "components")]
    pub target: Option<f64>,

    /// Flour A protein % or flour name
    #[arg(long, value_parser = parse_protein)]
    pub flour_a: Option<f64>,

    /// Flour B protein % or flour name
    #[arg(long, value_parser = parse_protein)]
    pub flour_b: Option<f64>,
}

#[derive(Args, Debug)]
pub struct BulkArgs {
    /// Dough temperature, °C (profile or 24 when omitted)
    #[arg(long)]
    pub temp: Option<f64>,

    /// Starter, % of flour
    #[arg(long)]
    pub starter: f64,

    /// Starter strength (profile or strong when omitted)
    #[arg(long, value_enum)]
    pub strength: Option<StrengthFlag>,

    /// Dough hydration, %
    #[arg(long)]
    pub hydration: Option<f64>,

    /// Whole-grain share of the flour, %
    #[arg(long)]
    pub whole_grain: Option<f64>,
}

#[derive(Args, Debug)]
pub struct DdtArgs {
    /// Desired dough temperature, °F
    #[arg(long)]
    pub target: Option<f64>,

    /// Room temperature, °F
    #[arg(long)]
    pub room: Option<f64>,

    /// Flour temperature, °F
    #[arg(long)]
    pub flour_temp: Option<f64>,

    /// Starter temperature, °F
    #[arg(long)]
    pub starter_temp: Option<f64>,

    /// Mixer friction factor, °F
    #[arg(long)]
    pub friction: Option<f64>,
}

#[derive(Args, Debug)]
pub struct ScaleArgs {
    /// Yield the recipe was written for (loaves, servings, ...)
    #[arg(long)]
    pub from: f64,

    /// Yield wanted
    #[arg(long)]
    pub to: f64,

    /// Ingredient as NAME=GRAMS (repeatable)
    #[arg(long = "ingredient", value_parser = parse_named_amount, required = true)]
    pub ingredients: Vec<(String, f64)>,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("weight")
        .args(["pre", "post"])
        .required(true)
))]
pub struct BakeLossArgs {
    /// Weight wanted after baking, grams
    #[arg(long)]
    pub post: Option<f64>,

    /// Dough weight before baking, grams
    #[arg(long)]
    pub pre: Option<f64>,

    /// Baking loss, % of the dough weight
    #[arg(long, default_value_t = 15.0)]
    pub loss: f64,
}

#[derive(Args, Debug)]
pub struct StarterArgs {
    /// Last feeding, RFC 3339 or HH:MM today
    #[arg(long, value_parser = parse_when)]
    pub last_fed: Option<DateTime<Utc>>,

    /// Feeding frequency, hours
    #[arg(long, default_value_t = 24)]
    pub frequency: u32,

    /// Activity level 1-5 from recent feedings (repeatable)
    #[arg(long = "activity")]
    pub activity: Vec<u8>,

    /// Starter is retired / in the fridge
    #[arg(long)]
    pub inactive: bool,

    /// Evaluate at this time instead of now
    #[arg(long, value_parser = parse_when)]
    pub now: Option<DateTime<Utc>>,
}

fn parse_named_amount(s: &str) -> Result<(String, f64), String> {
    let (name, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=AMOUNT, got {s:?}"))?;
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("{amount:?} is not a number"))?;
    Ok((name.trim().to_string(), amount))
}

fn parse_protein(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .ok()
        .or_else(|| FlourType::lookup(s).map(|f| f.protein_percent()))
        .ok_or_else(|| format!("{s:?} is neither a number nor a known flour"))
}

fn parse_component(s: &str) -> Result<BlendComponent, String> {
    let (pct, protein) = s
        .split_once(':')
        .ok_or_else(|| format!("expected PERCENT:PROTEIN, got {s:?}"))?;
    let percent = pct
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("{pct:?} is not a number"))?;
    Ok(BlendComponent {
        percent,
        protein_percent: parse_protein(protein)?,
    })
}

fn parse_when(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s.trim()) {
        return Ok(dt.with_timezone(&Utc));
    }
    let t = NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| format!("expected RFC 3339 or HH:MM, got {s:?}"))?;
    Local::now()
        .date_naive()
        .and_time(t)
        .and_local_timezone(Local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("{s:?} is ambiguous in the local time zone"))
}
