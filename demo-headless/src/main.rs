use clap::Parser;
use greenhouse_climate_core::{
    Celsius, ClimateEngine, ClimateReport, ClimateSample, EngineConfig, EnthalpyFormula, Percent,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Greenhouse climate engine demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "greenhouse-climate-demo")]
#[command(
    about = "Evaluate greenhouse climate samples into transpiration and water balance",
    long_about = None
)]
struct Args {
    /// JSON calibration file (reference calibration when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the enthalpy formula (thermodynamic, simplified)
    #[arg(short, long)]
    enthalpy: Option<String>,

    /// JSON array of climate samples, one per hour
    #[arg(short, long)]
    samples: Option<PathBuf>,

    /// Air temperature in °C
    #[arg(short, long, default_value_t = 22.0)]
    temperature: f64,

    /// Relative humidity in %
    #[arg(long, default_value_t = 70.0)]
    humidity: f64,

    /// Leaf temperature in °C (defaults to air temperature)
    #[arg(short, long)]
    leaf_temperature: Option<f64>,

    /// Global radiation in W/m²
    #[arg(short, long, default_value_t = 300.0)]
    radiation: f64,

    /// Air speed across the canopy in m/s
    #[arg(short, long, default_value_t = 0.3)]
    air_speed: f64,

    /// Irrigation rate in L/m²/h
    #[arg(short, long, default_value_t = 2.5)]
    irrigation: f64,

    /// Drainage fraction for the series water balance (configured default when omitted)
    #[arg(short, long)]
    drainage: Option<f64>,

    /// Print reports as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(name) = &args.enthalpy {
        config = config.with_enthalpy_formula(name.parse::<EnthalpyFormula>()?);
    }
    let engine = ClimateEngine::new(config)?;

    println!("=== Greenhouse Climate Demo ===\n");
    println!(
        "Calibration: P={}, Magnus c1={}, enthalpy={}, drainage={:.2}\n",
        engine.config().atmospheric_pressure,
        engine.config().magnus.c1,
        engine.config().enthalpy_formula,
        engine.config().drainage_fraction
    );

    let samples = match &args.samples {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<Vec<ClimateSample>>(&text)?
        }
        None => {
            let mut sample = ClimateSample::new(
                Celsius::new(args.temperature),
                Percent::new(args.humidity),
                args.radiation,
                args.air_speed,
                args.irrigation,
                chrono::Utc::now(),
            );
            if let Some(leaf) = args.leaf_temperature {
                sample = sample.with_leaf_temperature(Celsius::new(leaf));
            }
            vec![sample]
        }
    };

    for (i, result) in engine.evaluate_batch(&samples).into_iter().enumerate() {
        match result {
            Ok(report) if args.json => println!("{}", serde_json::to_string_pretty(&report)?),
            Ok(report) => print_report(i, &report),
            Err(e) => println!("Sample {i}: rejected ({e})"),
        }
    }

    if samples.len() > 1 {
        match engine.hourly_water_balance(&samples, args.drainage) {
            Ok(balance) => println!(
                "\n=== Water balance over {} ===\n\
                 Transpiration: {:.2} L/m², drainage: {:.2} L/m² ({:.0}%), total: {:.2} L/m²",
                balance.period,
                balance.transpiration,
                balance.drainage,
                balance.drainage_fraction * 100.0,
                balance.total_water_needed
            ),
            Err(e) => println!("\nWater balance unavailable: {e}"),
        }
    }
    Ok(())
}

fn print_report(index: usize, report: &ClimateReport) {
    let p = &report.psychrometrics;
    let t = &report.transpiration;
    let fx = &t.applied_effects;

    println!("Sample {index} @ {}", report.timestamp);
    println!(
        "  e_s: {}, e_a: {}, AH: {:.2} g/kg, h: {:.2} kJ/kg",
        p.saturation_pressure, p.actual_vapor_pressure, p.absolute_humidity, p.enthalpy
    );
    match p.dew_point {
        Some(dp) => println!("  Dew point: {dp}"),
        None => println!("  Dew point: n/a (dry air)"),
    }
    println!(
        "  VPD: {}, VPDi: {} [{}]",
        t.vpd.vpd, t.vpd.vpdi, t.vpd.band
    );
    let effects: Vec<String> = fx
        .entries()
        .iter()
        .map(|(name, value)| format!("{name}={value:.2}"))
        .collect();
    println!("  Effects: {}", effects.join(", "));
    println!(
        "  Transpiration: {:.3} L/m²/h ({:.2} L/m²/day){}",
        t.hourly_rate,
        t.daily_rate,
        if fx.floor_applied { " [floor]" } else { "" }
    );
    println!(
        "  Daily water need: {:.2} L/m² (drainage {:.2} L/m²)\n",
        report.water_balance.total_water_needed, report.water_balance.drainage
    );
}
