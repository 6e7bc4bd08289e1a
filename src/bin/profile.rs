use std::time::{Duration, Instant};

use mazeforge::{ChannelObserver, Generator, Hooks, MazeEvent, MazeParams, Solver};

/// Maximum number of maze events to buffer between the compute and drain threads
const MAX_EVENTS_IN_CHANNEL_BUFFER: usize = 1000;
const SIZE: usize = 255;

/// Totals for one generator/solver pair over all iterations.
#[derive(Debug, Default)]
struct Totals {
    generate: Duration,
    solve: Duration,
    path_length: usize,
    expanded: usize,
    unreachable: usize,
}

fn main() -> std::io::Result<()> {
    let file_appender = tracing_appender::rolling::never(".", "profile.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);

    let (event_tx, event_rx) = std::sync::mpsc::sync_channel::<MazeEvent>(MAX_EVENTS_IN_CHANNEL_BUFFER);

    // Drain events on a separate thread, the way a renderer would consume them
    let drain_thread_handle = std::thread::spawn(move || {
        let mut count = 0usize;
        while event_rx.recv().is_ok() {
            count += 1;
        }
        count
    });

    let compute_thread_handle = std::thread::spawn(move || {
        let mut observer = ChannelObserver::from(event_tx);
        let mut report = Vec::new();
        for generator in Generator::ALL {
            for solver in Solver::ALL {
                let totals = profile_pair(generator, solver, num_iters, &mut observer);
                tracing::info!("[profile] {} / {}: {:?}", generator, solver, totals);
                report.push((generator, solver, totals));
            }
        }
        report
    });

    let Ok(report) = compute_thread_handle.join() else {
        eprintln!("Compute thread panicked");
        return Ok(());
    };
    // The observer was dropped with the compute thread, so the drain loop ends
    let events = drain_thread_handle.join().unwrap_or_default();

    for (generator, solver, totals) in &report {
        let runs = num_iters.max(1) as u32;
        println!(
            "{:<40} {:<50} gen {:>10.3?} solve {:>10.3?} path {:>6} expanded {:>8} unreachable {}",
            generator.to_string(),
            solver.to_string(),
            totals.generate / runs,
            totals.solve / runs,
            totals.path_length / num_iters.max(1),
            totals.expanded / num_iters.max(1),
            totals.unreachable
        );
    }
    println!("{events} events observed");
    tracing::info!("[profile] {} events observed", events);
    Ok(())
}

fn profile_pair(
    generator: Generator,
    solver: Solver,
    num_iters: usize,
    observer: &mut ChannelObserver,
) -> Totals {
    let mut totals = Totals::default();
    for seed in 0..num_iters as u64 {
        let params = MazeParams::new(SIZE, SIZE)
            .with_generator(generator)
            .with_seed(seed)
            .with_loops(20);

        let started = Instant::now();
        let mut hooks = Hooks::none().with_observer(&mut *observer);
        let mut grid = match mazeforge::generate(&params, &mut hooks) {
            Ok(grid) => grid,
            Err(e) => {
                tracing::error!("[profile] {}", e);
                continue;
            }
        };
        totals.generate += started.elapsed();

        let started = Instant::now();
        let mut hooks = Hooks::none().with_observer(&mut *observer);
        match mazeforge::solve(&mut grid, solver, &mut hooks) {
            Ok(result) => {
                totals.solve += started.elapsed();
                totals.path_length += result.path_length;
                totals.expanded += result.expanded_count;
                if !result.reachable {
                    totals.unreachable += 1;
                }
            }
            Err(e) => tracing::error!("[profile] {}", e),
        }
    }
    totals
}
