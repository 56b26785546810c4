//! Run report printed when a session ends.

use std::time::Duration;

use contracts::SyncState;
use observability::SyncSummary;
use sim_host::HostSnapshot;

/// Statistics from a session run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Wall time spent in the loop
    pub duration: Duration,
    /// Stopped by a shutdown signal rather than the tick limit
    pub interrupted: bool,
    pub final_state: SyncState,
    pub snapshot: HostSnapshot,
    /// Simulation time rendered through the date formatter
    pub simulated_date: String,
    pub summary: SyncSummary,
}

impl RunReport {
    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Session Statistics                        ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Stopped by: {}", if self.interrupted { "signal" } else { "tick limit" });
        println!("   ├─ Final state: {}", self.final_state);
        println!("   ├─ Simulation time: {:.3}s", self.snapshot.simulation_seconds);
        println!("   ├─ Simulated date: {}", self.simulated_date);
        println!("   └─ Warp: index {} ({}x)", self.snapshot.warp_index, self.snapshot.multiplier);

        println!("\n📈 Sync Engine");
        for line in self.summary.to_string().lines().skip(1) {
            println!("   {line}");
        }

        println!();
    }
}
