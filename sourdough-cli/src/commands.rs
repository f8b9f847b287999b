//! One function per subcommand: merge flags into the profile, call the core,
//! print the result.

use crate::args::*;
use crate::error::{CliError, Result};
use crate::output::{fmt_f, fmt_g, fmt_h, fmt_pct, section, table};
use crate::profile::{KitchenProfile, prefer};
use chrono::{Local, Utc};
use comfy_table::Cell;
use sourdough_core::temperature::Severity;
use sourdough_core::*;

pub fn run(command: &Command, profile: &mut KitchenProfile) -> Result<()> {
    match command {
        Command::Percent(a) => percent(a, profile),
        Command::Hydration(a) => hydration(a),
        Command::Levain(a) => levain(a, profile),
        Command::Feed(a) => feed(a, profile),
        Command::Preferment(a) => preferment_cmd(a),
        Command::Blend(a) => blend(a),
        Command::Bulk(a) => bulk(a, profile),
        Command::Ddt(a) => ddt(a, profile),
        Command::Scale(a) => scale_cmd(a),
        Command::BakeLoss(a) => bake_loss(a),
        Command::Starter(a) => starter(a),
    }
}

fn percent(a: &PercentArgs, profile: &mut KitchenProfile) -> Result<()> {
    prefer(&mut profile.starter_hydration, a.starter_hydration);

    let mut formula = match (a.flour, a.dough_weight) {
        (Some(flour), _) => Formula::new(flour, a.water, a.salt, a.starter)?,
        (None, Some(total)) => Formula::for_dough_weight(total, a.water, a.salt, a.starter)?,
        (None, None) => return Err(CliError::Usage("give --flour or --dough-weight".into())),
    };
    for (name, pct) in &a.additions {
        formula = formula.with_ingredient(Ingredient::percent(
            name.as_str(),
            *pct,
            IngredientCategory::Other,
        )?);
    }
    let w = formula.weights();

    let mut t = table(&["Ingredient", "Baker's %", "Weight"]);
    t.add_row(vec![Cell::new("Flour"), Cell::new("100%"), Cell::new(fmt_g(w.flour_g))]);
    t.add_row(vec![
        Cell::new("Water"),
        Cell::new(fmt_pct(formula.water_percent())),
        Cell::new(fmt_g(w.water_g)),
    ]);
    t.add_row(vec![
        Cell::new("Salt"),
        Cell::new(fmt_pct(formula.salt_percent())),
        Cell::new(fmt_g(w.salt_g)),
    ]);
    t.add_row(vec![
        Cell::new("Starter"),
        Cell::new(fmt_pct(formula.starter_percent())),
        Cell::new(fmt_g(w.starter_g)),
    ]);
    for (orig, grams) in formula.additional_ingredients().iter().zip(&w.additions) {
        t.add_row(vec![
            Cell::new(orig.name()),
            Cell::new(fmt_pct(orig.amount())),
            Cell::new(fmt_g(grams.amount())),
        ]);
    }
    t.add_row(vec![Cell::new("Total"), Cell::new(""), Cell::new(fmt_g(w.total_g))]);

    section("Formula");
    println!("{t}");

    let overall = overall_hydration(
        w.flour_g,
        w.water_g,
        w.starter_g,
        profile.starter_hydration_or_default(),
    )?;
    let class = starter_percent_class(formula.starter_percent())?;
    println!("\nOverall hydration (incl. starter): {}", fmt_pct(overall));
    println!("Fermentation speed: {} | {}", class.speed, class.advice);
    Ok(())
}

fn hydration(a: &HydrationArgs) -> Result<()> {
    section("Hydration");
    match (a.flour, a.water, a.target) {
        (Some(flour), Some(water), None) => {
            println!("Hydration: {}", fmt_pct(hydration_percent(flour, water)?));
        }
        (Some(flour), None, Some(target)) => {
            println!("Water needed: {}", fmt_g(water_for_target_hydration(flour, target)?));
        }
        (None, Some(water), Some(target)) => {
            println!("Flour needed: {}", fmt_g(flour_for_target_hydration(water, target)?));
        }
        _ => {
            return Err(CliError::Usage(
                "give exactly two of --flour, --water, --target".into(),
            ));
        }
    }
    Ok(())
}

fn levain(a: &LevainArgs, profile: &mut KitchenProfile) -> Result<()> {
    prefer(&mut profile.starter_hydration, a.hydration);
    let hyd = profile.starter_hydration_or_default();
    let split = decompose_levain(a.mass, hyd)?;

    let mut t = table(&["Part", "Weight"]);
    t.add_row(vec![Cell::new("Flour"), Cell::new(fmt_g(split.flour_g))]);
    t.add_row(vec![Cell::new("Water"), Cell::new(fmt_g(split.water_g))]);
    section(&format!("Levain {} at {}", fmt_g(a.mass), fmt_pct(hyd)));
    println!("{t}");
    Ok(())
}

fn feed(a: &FeedArgs, profile: &mut KitchenProfile) -> Result<()> {
    prefer(&mut profile.feeding_ratio, a.ratio);
    let ratio = profile.feeding_ratio_or_default();
    let b = build_feeding(a.need, a.current, ratio)?;

    let mut t = table(&["Step", "Weight"]);
    t.add_row(vec![Cell::new("Discard"), Cell::new(fmt_g(b.discard_g))]);
    t.add_row(vec![Cell::new("Keep starter"), Cell::new(fmt_g(b.use_starter_g))]);
    t.add_row(vec![Cell::new("Add flour"), Cell::new(fmt_g(b.add_flour_g))]);
    t.add_row(vec![Cell::new("Add water"), Cell::new(fmt_g(b.add_water_g))]);
    section(&format!("Feeding {ratio} for {}", fmt_g(a.need)));
    println!("{t}");
    Ok(())
}

fn preferment_cmd(a: &PrefermentArgs) -> Result<()> {
    let c = preferment(a.flour, a.percent, a.kind.into())?;

    let mut t = table(&["Ingredient", "Weight"]);
    t.add_row(vec![Cell::new("Flour"), Cell::new(fmt_g(c.flour_g))]);
    t.add_row(vec![Cell::new("Water"), Cell::new(fmt_g(c.water_g))]);
    t.add_row(vec![Cell::new("Yeast"), Cell::new(fmt_g(c.yeast_g))]);
    t.add_row(vec![Cell::new("Salt"), Cell::new(fmt_g(c.salt_g))]);
    t.add_row(vec![Cell::new("Total"), Cell::new(fmt_g(c.total_g))]);
    section(&c.kind.to_string());
    println!("{t}");
    println!("\nFlour left for the final dough: {}", fmt_g(c.main_dough_flour_g));
    Ok(())
}

fn blend(a: &BlendArgs) -> Result<()> {
    if let (Some(target), Some(pa), Some(pb)) = (a.target, a.flour_a, a.flour_b) {
        let s = solve_two_flour_blend(target, pa, pb)?;
        let mut t = table(&["Flour", "Protein", "Share"]);
        t.add_row(vec![Cell::new("A"), Cell::new(fmt_pct(pa)), Cell::new(fmt_pct(s.percent_a))]);
        t.add_row(vec![Cell::new("B"), Cell::new(fmt_pct(pb)), Cell::new(fmt_pct(s.percent_b))]);
        section(&format!("Blend for {} protein", fmt_pct(target)));
        println!("{t}");
        return Ok(());
    }

    if a.components.is_empty() {
        return Err(CliError::Usage(
            "give --component entries, or --target with --flour-a and --flour-b".into(),
        ));
    }
    let b = blend_protein(&a.components)?;
    section("Blend");
    println!("Protein: {}", fmt_pct(b.protein_percent));
    if !b.sums_to_hundred() {
        tracing::warn!(total = b.total_percent, "blend does not sum to 100%");
        println!("Warning: shares add up to {}, not 100%", fmt_pct(b.total_percent));
    }
    Ok(())
}

fn bulk(a: &BulkArgs, profile: &mut KitchenProfile) -> Result<()> {
    prefer(&mut profile.bulk_temp_c, a.temp);
    prefer(&mut profile.strength, a.strength.map(Into::into));

    let input = BulkInput {
        temperature_c: profile.bulk_temp_c_or_default(),
        starter_percent: a.starter,
        strength: profile.strength_or_default(),
        hydration_percent: a.hydration,
        whole_grain_percent: a.whole_grain,
    };
    let e = estimate_bulk(input)?;

    let mut t = table(&["Estimate", "Hours"]);
    t.add_row(vec![Cell::new("Earliest"), Cell::new(fmt_h(e.min_hours))]);
    t.add_row(vec![Cell::new("Optimal"), Cell::new(fmt_h(e.optimal_hours))]);
    t.add_row(vec![Cell::new("Latest"), Cell::new(fmt_h(e.max_hours))]);
    section(&format!("Bulk fermentation at {}°C", input.temperature_c));
    println!("{t}");

    if !e.notes.is_empty() {
        println!("\nNotes:");
        for n in &e.notes {
            println!("• {n}");
        }
    }
    Ok(())
}

fn ddt(a: &DdtArgs, profile: &mut KitchenProfile) -> Result<()> {
    prefer(&mut profile.target_ddt_f, a.target);
    prefer(&mut profile.room_temp_f, a.room);
    prefer(&mut profile.flour_temp_f, a.flour_temp);
    prefer(&mut profile.starter_temp_f, a.starter_temp);
    prefer(&mut profile.friction_factor_f, a.friction);

    let inputs = profile.ddt_inputs();
    let s = inputs.solve()?;

    section(&format!("Water for a {} dough", fmt_f(inputs.target_ddt_f)));
    println!("Water temperature: {}", fmt_f(s.water_temp_f));
    match s.advice.severity() {
        Severity::Error => {
            tracing::warn!(water_temp_f = s.water_temp_f, "water temperature out of range");
            println!("Error: {}", s.advice);
        }
        Severity::Warning => println!("Warning: {}", s.advice),
        Severity::Info => println!("{}", s.advice),
    }
    Ok(())
}

fn scale_cmd(a: &ScaleArgs) -> Result<()> {
    let ingredients = a
        .ingredients
        .iter()
        .map(|(name, g)| Ingredient::grams(name.as_str(), *g, IngredientCategory::Other))
        .collect::<sourdough_core::Result<Vec<_>>>()?;
    let scaled = scale(&ingredients, a.from, a.to)?;

    let mut t = table(&["Ingredient", "Original", "Scaled"]);
    for (orig, new) in ingredients.iter().zip(&scaled) {
        t.add_row(vec![
            Cell::new(orig.name()),
            Cell::new(fmt_g(orig.amount())),
            Cell::new(fmt_g(new.amount())),
        ]);
    }
    section(&format!("Scaled from {} to {}", a.from, a.to));
    println!("{t}");
    Ok(())
}

fn bake_loss(a: &BakeLossArgs) -> Result<()> {
    let w = match (a.pre, a.post) {
        (_, Some(post)) => pre_bake_weight(post, a.loss)?,
        (Some(pre), None) => post_bake_weight(pre, a.loss)?,
        (None, None) => return Err(CliError::Usage("give --pre or --post".into())),
    };

    let mut t = table(&["Stage", "Weight"]);
    t.add_row(vec![Cell::new("Dough (pre-bake)"), Cell::new(fmt_g(w.pre_bake_g))]);
    t.add_row(vec![Cell::new("Loaf (post-bake)"), Cell::new(fmt_g(w.post_bake_g))]);
    t.add_row(vec![Cell::new("Weight loss"), Cell::new(fmt_g(w.weight_loss_g))]);
    section(&format!("Baking loss {}", fmt_pct(a.loss)));
    println!("{t}");
    Ok(())
}

fn starter(a: &StarterArgs) -> Result<()> {
    const CLI_STARTER_ID: &str = "cli";

    let now = a.now.unwrap_or_else(Utc::now);
    let logs = a
        .activity
        .iter()
        .map(|&level| FeedingLog::new(CLI_STARTER_ID, now).with_activity_level(level))
        .collect::<sourdough_core::Result<Vec<_>>>()?;

    let mut s = Starter::new(
        CLI_STARTER_ID,
        "Starter",
        "unspecified",
        FeedingRatio::default(),
        a.frequency,
    )?
    .with_activity_from_logs(&logs);
    if let Some(at) = a.last_fed {
        s = s.fed_at(at)?;
    }
    if a.inactive {
        s = s.with_active(false);
    }
    let status = feeding_status(&s.refreshed(now), now);

    section("Starter");
    match (status.due_at, status.text) {
        (Some(due), Some(text)) => {
            let local = due.with_timezone(&Local);
            println!("Next feeding: {}", local.format("%Y-%m-%d %H:%M"));
            println!("{text}");
        }
        _ => println!("No feeding recorded yet"),
    }
    if let Some(avg) = s.avg_activity_level() {
        println!("Average activity: {avg:.1}");
    }
    println!("Health: {}", status.health);
    Ok(())
}
