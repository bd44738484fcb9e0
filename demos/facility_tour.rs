use facility_pathfinding::*;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

// Walks the mover E past every friend (D, L, M, W) and out through the exit door '!' of a
// facility map, drawing each step in the terminal with the colours of the terrain table.
//
//     cargo run --example facility_tour -- demos/laboratory.txt
//
// Set RUST_LOG=debug to see search statistics.

const FRAME_DELAY: Duration = Duration::from_millis(100);

struct TerminalRenderer<'a> {
    table: &'a TerrainTable,
    out: io::Stdout,
}

impl TerminalRenderer<'_> {
    fn write_frame(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let mut out = self.out.lock();
        // Clear the screen and move the cursor home
        write!(out, "\x1b[2J\x1b[H")?;
        for row in frame.map.rows() {
            for &symbol in row {
                let [r, g, b] = self.table.color(symbol);
                write!(out, "\x1b[48;2;{r};{g};{b}m  ")?;
            }
            writeln!(out, "\x1b[0m")?;
        }
        match frame.total_cost {
            Some(total) => write!(out, "Total cost: {total}")?,
            None => write!(out, "Finding total cost...")?,
        }
        if let Some(leg_cost) = frame.leg_cost {
            write!(out, "    Current cost: {leg_cost}")?;
        }
        writeln!(out)?;
        if frame.path.is_none() {
            writeln!(out, "\x1b[31mNo path found, not every friend can be saved\x1b[0m")?;
        }
        out.flush()
    }
}

impl Renderer for TerminalRenderer<'_> {
    fn draw(&mut self, frame: &Frame<'_>) {
        if let Err(e) = self.write_frame(frame) {
            log::warn!("Could not draw frame: {e}");
        }
        if frame.total_cost.is_none() {
            thread::sleep(FRAME_DELAY);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/laboratory.txt".to_owned());
    let mut map = FacilityMap::read_map(&path)?;
    let table = TerrainTable::facility();
    let costs = CostMatrix::from_map(&map, &table);
    let tour = Tour::facility(&map)?;

    let mut renderer = TerminalRenderer {
        table: &table,
        out: io::stdout(),
    };
    let report = tour.run(&AstarSolver::new(), &costs, &mut map, &mut renderer);
    for leg in &report.legs {
        println!(
            "{}: {} steps, cost {}",
            leg.target,
            leg.route.steps(),
            leg.route.cost
        );
    }
    if let Some(unreached) = report.unreached {
        println!("Could not reach {}: {}", unreached.target, unreached.error);
    }
    println!("Total cost: {}", report.total_cost);
    Ok(())
}
