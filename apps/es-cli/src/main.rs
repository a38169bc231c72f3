mod error;
mod runtime;

use clap::{Parser, Subcommand};
use error::{AppError, AppResult};
use es_kinematics::{CrankPose, KinematicGeometryEngine, Position, advance_crank_angle};
use es_performance::{PerformanceCurve, PerformanceResult, RpmSweep};
use es_project::EngineDefinition;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uom::si::volume::liter;

#[derive(Parser)]
#[command(name = "es-cli")]
#[command(about = "Engine performance and crank-train kinematics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the fuel catalog
    Fuels {
        /// Only show fuels matching this text
        query: Option<String>,
    },
    /// Validate an engine definition file
    Validate {
        /// Path to the engine definition (YAML or JSON)
        definition: PathBuf,
    },
    /// Performance at one operating point
    Report {
        /// Path to the engine definition (YAML or JSON)
        definition: PathBuf,
        /// Engine speed, overriding the definition
        #[arg(long)]
        rpm: Option<f64>,
        /// VE/BSFC map file, overriding the definition
        #[arg(long)]
        map: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Torque and power curve as CSV
    Sweep {
        /// Path to the engine definition (YAML or JSON)
        definition: PathBuf,
        /// First speed (rpm)
        #[arg(long)]
        start: Option<f64>,
        /// Last speed (rpm), defaults to redline
        #[arg(long)]
        end: Option<f64>,
        /// Speed increment (rpm)
        #[arg(long, default_value_t = 250.0)]
        step: f64,
        /// Second engine definition to sweep over the same speeds
        #[arg(long)]
        compare: Option<PathBuf>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Crank-train positions of every cylinder
    Pose {
        /// Path to the engine definition (YAML or JSON)
        definition: PathBuf,
        /// Base crank angle (degrees)
        #[arg(long, default_value_t = 0.0)]
        angle: f64,
        /// Number of animation frames at the definition's speed
        #[arg(long, default_value_t = 1)]
        frames: usize,
        /// Time between frames (s)
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,
        /// Print poses as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fuels { query } => cmd_fuels(query.as_deref()),
        Commands::Validate { definition } => cmd_validate(&definition),
        Commands::Report {
            definition,
            rpm,
            map,
            json,
        } => cmd_report(&definition, rpm, map.as_deref(), json),
        Commands::Sweep {
            definition,
            start,
            end,
            step,
            compare,
            output,
        } => cmd_sweep(
            &definition,
            start,
            end,
            step,
            compare.as_deref(),
            output.as_deref(),
        ),
        Commands::Pose {
            definition,
            angle,
            frames,
            dt,
            json,
        } => cmd_pose(&definition, angle, frames, dt, json),
    }
}

fn cmd_fuels(query: Option<&str>) -> AppResult<()> {
    let fuels = es_fuels::filter_fuel_catalog(query.unwrap_or(""));
    if fuels.is_empty() {
        println!("No fuels match");
        return Ok(());
    }
    println!(
        "{:<10} {:<20} {:>12} {:>12} {:>8}",
        "id", "name", "LHV MJ/kg", "kg/L", "AFR"
    );
    for fuel in fuels {
        println!(
            "{:<10} {:<20} {:>12.1} {:>12.2} {:>8.1}",
            fuel.canonical_id,
            fuel.display_name,
            fuel.spec.lhv_mj_per_kg,
            fuel.spec.density_kg_per_l,
            fuel.spec.stoich_afr
        );
    }
    Ok(())
}

fn cmd_validate(path: &Path) -> AppResult<()> {
    println!("Validating engine definition: {}", path.display());
    let def = es_project::load(path)?;
    let geometry = runtime::geometry(&def)?;
    println!("✓ Definition is valid");
    println!(
        "  {} - {} cylinder {}, {:.3} L",
        def.name,
        geometry.cylinders,
        geometry.layout,
        geometry.displacement().get::<liter>()
    );
    Ok(())
}

fn cmd_report(path: &Path, rpm: Option<f64>, map: Option<&Path>, json: bool) -> AppResult<()> {
    let def = es_project::load(path)?;
    let map = runtime::select_map(&def, path, map);
    let model = runtime::model(&def, map)?;
    let result = model.compute(&runtime::conditions(&def, rpm)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.report())?);
    } else {
        print_report(&def, &result);
    }
    Ok(())
}

fn print_report(def: &EngineDefinition, r: &PerformanceResult) {
    println!("{} @ {:.0} rpm", def.name, r.rpm);
    println!("  Displacement:        {:.3} L", r.displacement_liters());
    println!("  Brake power:         {:.1} hp", r.bhp());
    println!("  Indicated power:     {:.1} hp", r.ihp());
    println!("  Torque:              {:.1} N·m", r.torque_nm());
    println!("  BMEP:                {:.0} kPa", r.bmep_kpa());
    println!("  IMEP:                {:.0} kPa", r.imep_kpa());
    println!("  FMEP:                {:.0} kPa", r.fmep_kpa());
    println!("  BSFC:                {:.0} g/kWh", r.bsfc_g_per_kwh);
    println!("  Mean piston speed:   {:.1} m/s", r.mean_piston_speed_m_s());
    println!("  Air flow:            {:.4} kg/s", r.air_mass_flow_kg_s());
    println!("  Fuel flow:           {:.2} L/h", r.fuel_flow_l_per_h());
    println!("  Volumetric eff.:     {:.1} %", r.volumetric_efficiency.percent());
    println!("  Mechanical eff.:     {:.1} %", r.mechanical_efficiency.percent());
    println!(
        "  Brake thermal eff.:  {:.1} %",
        r.brake_thermal_efficiency.percent()
    );
    println!(
        "  Ideal Otto eff.:     {:.1} %",
        r.ideal_thermal_efficiency.percent()
    );
}

fn sweep_curve(
    path: &Path,
    start: Option<f64>,
    end: Option<f64>,
    step: f64,
) -> AppResult<(EngineDefinition, PerformanceCurve)> {
    let def = es_project::load(path)?;
    let model = runtime::model(&def, runtime::select_map(&def, path, None))?;
    let base = runtime::conditions(&def, None)?;
    let redline = def.operating.redline_rpm;
    let sweep = RpmSweep::new(
        start.unwrap_or_else(|| 1000.0_f64.min(redline)),
        end.unwrap_or(redline),
        step,
    )?;
    let curve = model.sweep(&base, &sweep)?;
    Ok((def, curve))
}

fn cmd_sweep(
    path: &Path,
    start: Option<f64>,
    end: Option<f64>,
    step: f64,
    compare: Option<&Path>,
    output: Option<&Path>,
) -> AppResult<()> {
    let mut curves = vec![sweep_curve(path, start, end, step)?];
    if let Some(other) = compare {
        // Same speed range as the primary engine
        let (def, _) = &curves[0];
        let end = end.or(Some(def.operating.redline_rpm));
        curves.push(sweep_curve(other, start, end, step)?);
    }

    let mut csv = String::from(
        "engine,rpm,torque_nm,bhp,bmep_kpa,ve_percent,mechanical_efficiency_percent\n",
    );
    for (def, curve) in &curves {
        for p in curve.points() {
            csv.push_str(&format!(
                "{},{},{:.3},{:.3},{:.3},{:.3},{:.3}\n",
                csv_field(&def.name),
                p.rpm,
                p.torque_nm(),
                p.bhp(),
                p.bmep_kpa(),
                p.volumetric_efficiency.percent(),
                p.mechanical_efficiency.percent()
            ));
        }
    }

    if let Some(path) = output {
        std::fs::write(path, csv).map_err(|source| AppError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        println!("✓ Wrote sweep to {}", path.display());
    } else {
        print!("{}", csv);
    }

    for (def, curve) in &curves {
        if let (Some(t), Some(p)) = (curve.peak_torque(), curve.peak_power()) {
            eprintln!(
                "{}: peak torque {:.1} N·m @ {:.0} rpm, peak power {:.1} hp @ {:.0} rpm",
                def.name,
                t.torque_nm(),
                t.rpm,
                p.bhp(),
                p.rpm
            );
        }
    }
    Ok(())
}

fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

#[derive(Serialize)]
struct PoseRecord {
    frame: usize,
    base_angle_deg: f64,
    cylinder: usize,
    bank: String,
    crank_angle_deg: f64,
    stroke: String,
    crank_pin_m: [f64; 3],
    piston_m: [f64; 3],
    rod_big_end_m: [f64; 3],
    piston_axial_m: f64,
    bank_rotation_deg: f64,
}

impl PoseRecord {
    fn new(frame: usize, base_angle_deg: f64, pose: &CrankPose) -> Self {
        let xyz = |p: &Position| [p.x, p.y, p.z];
        Self {
            frame,
            base_angle_deg,
            cylinder: pose.cylinder,
            bank: format!("{:?}", pose.bank),
            crank_angle_deg: pose.crank_angle_deg,
            stroke: pose.stroke.to_string(),
            crank_pin_m: xyz(&pose.crank_pin),
            piston_m: xyz(&pose.piston),
            rod_big_end_m: xyz(&pose.rod_big_end),
            piston_axial_m: pose.piston_axial,
            bank_rotation_deg: pose.bank_rotation_deg,
        }
    }
}

fn cmd_pose(path: &Path, angle: f64, frames: usize, dt: f64, json: bool) -> AppResult<()> {
    if frames == 0 {
        return Err(AppError::InvalidInput("frames must be at least 1".into()));
    }
    if !dt.is_finite() || dt < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "dt must be finite and >= 0, got {dt}"
        )));
    }
    let def = es_project::load(path)?;
    let engine = KinematicGeometryEngine::new(&runtime::geometry(&def)?)?;

    let mut records = Vec::new();
    let mut base = angle;
    for frame in 0..frames {
        for pose in engine.pose(base)? {
            records.push(PoseRecord::new(frame, base, &pose));
        }
        base = advance_crank_angle(base, def.operating.rpm, dt);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for record in &records {
        if record.cylinder == 0 {
            println!("frame {} @ {:.1}°", record.frame, record.base_angle_deg);
        }
        println!(
            "  cyl {:>2} {:<6} {:>6.1}° {:<12} piston {:>8.2} mm  pin ({:>7.2}, {:>7.2}, {:>7.2}) mm",
            record.cylinder + 1,
            record.bank,
            record.crank_angle_deg,
            record.stroke,
            record.piston_axial_m * 1000.0,
            record.crank_pin_m[0] * 1000.0,
            record.crank_pin_m[1] * 1000.0,
            record.crank_pin_m[2] * 1000.0
        );
    }
    Ok(())
}
