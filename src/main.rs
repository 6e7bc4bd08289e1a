use std::io::{BufRead, Write};

use crossterm::style::{Color, StyledContent, Stylize};
use mazeforge::{Generator, Hooks, MazeParams, SolveResult, Solver, maze::Glyph};

/// Log file written next to the binary's working directory.
const LOG_FILE: &str = "mazeforge.log";
/// Largest side this host will print.
const MAX_DIMENSION: usize = 4096;

fn main() -> std::io::Result<()> {
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut prompt = |text: &str| -> std::io::Result<String> {
        println!("{text}");
        std::io::stdout().flush()?;
        Ok(lines.next().transpose()?.unwrap_or_default())
    };

    // Parse the input dimensions
    let input = prompt(&format!(
        "Enter maze dimensions (height width). Maximum size is {0}x{0}:",
        MAX_DIMENSION
    ))?;
    let dims = input
        .split_whitespace()
        .take(2)
        .filter_map(|s| s.parse::<usize>().ok())
        .collect::<Vec<_>>();
    let &[height, width] = &dims[..] else {
        eprintln!("Please enter two valid numbers for height and width.");
        return Ok(());
    };
    if height > MAX_DIMENSION || width > MAX_DIMENSION {
        eprintln!("Height and width must be at most {MAX_DIMENSION}.");
        return Ok(());
    }

    // Let user select the algorithms
    let Some(generator) = select(&mut prompt, "Select maze generation algorithm:", &Generator::ALL)?
    else {
        eprintln!("Invalid selection.");
        return Ok(());
    };
    let Some(solver) = select(&mut prompt, "Select maze solving algorithm:", &Solver::ALL)? else {
        eprintln!("Invalid selection.");
        return Ok(());
    };

    let input = prompt("Enter a seed (empty for random):")?;
    let seed = input.trim().parse::<u64>().ok();

    let input = prompt("Enter rooms, loops, islands and obstacles percentages (empty for none):")?;
    let percents = input
        .split_whitespace()
        .filter_map(|s| s.parse::<u8>().ok())
        .chain(std::iter::repeat(0))
        .take(4)
        .collect::<Vec<_>>();

    let mut params = MazeParams::new(height, width)
        .with_generator(generator)
        .with_rooms(percents[0])
        .with_loops(percents[1])
        .with_islands(percents[2])
        .with_obstacles(percents[3]);
    params.seed = seed;

    let mut grid = match mazeforge::generate(&params, &mut Hooks::none()) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("{e}");
            return Ok(());
        }
    };
    let result = match mazeforge::solve(&mut grid, solver, &mut Hooks::none()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{e}");
            return Ok(());
        }
    };

    let mut stdout = std::io::stdout().lock();
    for line in grid.glyphs() {
        for glyph in line {
            write!(stdout, "{}", styled(glyph))?;
        }
        writeln!(stdout)?;
    }
    print_stats(&mut stdout, solver, &result)?;
    Ok(())
}

/// Lists `options` numbered from 1 and reads the user's pick.
fn select<T: Copy + std::fmt::Display>(
    prompt: &mut impl FnMut(&str) -> std::io::Result<String>,
    title: &str,
    options: &[T],
) -> std::io::Result<Option<T>> {
    let mut text = title.to_string();
    for (i, option) in options.iter().enumerate() {
        text.push_str(&format!("\n{}. {}", i + 1, option));
    }
    let input = prompt(&text)?;
    Ok(input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i).copied()))
}

/// Two terminal columns per glyph so cells come out roughly square.
fn styled(glyph: Glyph) -> StyledContent<String> {
    let text = match glyph {
        Glyph::Wall => "██".to_string(),
        other => format!("{0}{0}", other.symbol()),
    };
    match glyph {
        Glyph::Wall => text.with(Color::White),
        Glyph::Open => text.with(Color::Reset),
        Glyph::Start => text.with(Color::Green).bold(),
        Glyph::Goal => text.with(Color::Red).bold(),
        Glyph::Obstacle => text.with(Color::DarkGrey),
        Glyph::Island => text.with(Color::Cyan),
        Glyph::Visited => text.with(Color::Blue),
        Glyph::DeadEnd => text.with(Color::Magenta),
        Glyph::Route => text.with(Color::Yellow).bold(),
    }
}

fn print_stats(out: &mut impl Write, solver: Solver, result: &SolveResult) -> std::io::Result<()> {
    writeln!(out, "{solver}")?;
    if result.reachable {
        writeln!(
            out,
            "Maze solved! Path length {} (cost {:.3}).",
            result.path_length, result.path_cost
        )?;
    } else {
        writeln!(out, "No path found to the goal.")?;
    }
    writeln!(
        out,
        "Expanded {} cells, {} frontier insertions.",
        result.expanded_count, result.frontier_insertions
    )
}
