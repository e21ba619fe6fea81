mod cli;

use chrono::{Local, NaiveDateTime, NaiveTime};
use clap::Parser;
use courier_copilot::algorithms::cluster_sort::initial_cluster_sort;
use courier_copilot::utils::city_memory::CityMemoryEstimator;
use courier_copilot::utils::distance::HaversineEstimator;
use courier_copilot::utils::init_route::{random_route, sample_route};
use courier_copilot::utils::label_ingest::{default_lockers, LockerLabelIngestor};
use courier_copilot::utils::route_store::{load_route, save_route};
use courier_copilot::utils::service_area::ServiceArea;
use courier_copilot::{
    apply_suggestion, Copilot, CopilotConfig, Result, RouteOptimizer, RouteSession, Stop,
    StopStatus,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::{Cli, Command};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => CopilotConfig::from_file(path)?,
        None => CopilotConfig::default(),
    };
    let optimizer = build_optimizer(&config)?;

    match cli.command {
        Command::Timeline { route, start } => {
            let stops = load_route(&route)?;
            let timed = optimizer.propagate(&stops, start_at(start));
            print_timeline(&timed);
        }
        Command::Suggest {
            route,
            start,
            apply,
        } => {
            let stops = optimizer.propagate(&load_route(&route)?, start_at(start));
            match optimizer.find_optimization(&stops, start_at(start)) {
                Some(suggestion) => {
                    println!("{}", suggestion.message);
                    println!("  Affected stops: {:?}", suggestion.affected_stop_ids);
                    print_timeline(&suggestion.proposed_stops);
                    if apply {
                        let proposed = apply_suggestion(&stops, suggestion)?;
                        save_route(&route, &proposed)?;
                        println!("Route updated in {}", route.display());
                    }
                }
                None => println!("Current order is fine, no shortcut worth taking."),
            }
        }
        Command::Demo {
            random,
            seed,
            start,
        } => {
            let area = config
                .service_area()?
                .unwrap_or(ServiceArea::new(52.030, 52.065, 15.070, 15.140)?);
            let stops = match random {
                Some(count) => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    random_route(&area, count, 8, 5, &mut rng)
                }
                None => sample_route(),
            };
            run_demo(optimizer, stops, start_at(start))?;
        }
    }
    Ok(())
}

fn build_optimizer(config: &CopilotConfig) -> Result<Box<dyn RouteOptimizer>> {
    match &config.city_memory {
        Some(memory) => {
            let fallback = HaversineEstimator::new(&config.estimator);
            let estimator =
                CityMemoryEstimator::load(&memory.path, fallback, memory.min_confidence)?;
            Ok(Box::new(Copilot::with_estimator(estimator, config)))
        }
        None => Ok(Box::new(Copilot::from_config(config))),
    }
}

fn start_at(start: Option<NaiveTime>) -> NaiveDateTime {
    let now = Local::now().naive_local();
    match start {
        Some(time) => now.date().and_time(time),
        None => now,
    }
}

fn print_timeline(stops: &[Stop]) {
    println!("------------------------------------------");
    for (i, stop) in stops.iter().enumerate() {
        let eta = stop.calculated_eta.as_deref().unwrap_or("--:--");
        let label = stop
            .address
            .as_deref()
            .or(stop.shipment_id.as_deref())
            .unwrap_or("(no address)");
        let flags = format!(
            "{}{}{}",
            if stop.priority { "P" } else { " " },
            if stop.locked { "L" } else { " " },
            if stop.location.is_none() { "?" } else { " " },
        );
        println!(
            "{:>2}. {} [{}] {:<10} {:<9} {}",
            i + 1,
            eta,
            flags,
            stop.id,
            stop.status,
            label
        );
    }
    if let Some(bounds) = ServiceArea::bounding(stops) {
        let (sw, ne) = (bounds.south_west(), bounds.north_east());
        println!(
            "Route spans ({:.3}, {:.3}) to ({:.3}, {:.3})",
            sw.lat, sw.lng, ne.lat, ne.lng
        );
    }
}

/// Delivers stops one by one, taking every shortcut the copilot offers
fn run_demo(
    optimizer: Box<dyn RouteOptimizer>,
    stops: Vec<Stop>,
    start: NaiveDateTime,
) -> Result<()> {
    let sorted = initial_cluster_sort(&stops, &optimizer, start);
    let mut session = RouteSession::new(optimizer, sorted, start);
    println!("Initial route ({} stops):", session.stops().len());
    print_timeline(session.stops());

    let ingestor = LockerLabelIngestor::new(default_lockers())?;
    let mut total_savings = 0;
    let mut delivered = 0;

    while let Some(next) = session.stops().iter().find(|s| s.is_pending()).cloned() {
        if let Some(suggestion) = session.run_copilot() {
            println!("\nCopilot: {}", suggestion.message);
            total_savings += session.apply_suggestion()?;
            print_timeline(session.stops());
            continue;
        }

        session.set_status(&next.id, StopStatus::Delivered)?;
        delivered += 1;
        println!("\nDelivered {}", next.id);

        // A parcel handed over at the second stop, destined for a locker
        if delivered == 2 {
            let stop = ingestor.ingest("INPOST PACZKOMAT_KRO99P");
            println!("Scanned new parcel {} for locker KRO99P", stop.id);
            session.add_stop(stop);
            print_timeline(session.stops());
        }
    }

    println!(
        "\nShift complete: {} stops delivered, {} min saved by shortcuts.",
        delivered, total_savings
    );
    Ok(())
}
