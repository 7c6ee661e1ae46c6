//! Bridge statistics collection and reporting.
//!
//! This module tracks what a run did on both sides of the bus. It provides:
//! 1. **Execution:** Frames completed, instructions stepped, and MCU cycles consumed.
//! 2. **Synchronization:** Peer ticks, bus pushes, suppressed pushes, and collapsed tick sentinels.
//! 3. **Derived metrics:** MCU cycles per peer tick and host-side throughput.

use std::time::Instant;

/// Counters kept by the synchronization controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncCounters {
    /// Peer ticks executed.
    pub ticks: u64,
    /// Bus states actually sent to the peer.
    pub pushes: u64,
    /// Pushes skipped because the encoded state had not changed.
    pub pushes_suppressed: u64,
    /// Tick sentinels that arrived while a request was already pending.
    pub ticks_collapsed: u64,
    /// Non-tick trace markers seen.
    pub markers: u64,
}

/// Run statistics.
#[derive(Debug, Clone)]
pub struct BridgeStats {
    start_time: Instant,
    /// Frames completed.
    pub frames: u64,
    /// MCU instructions stepped.
    pub instructions: u64,
    /// MCU cycles consumed, as summed from step results.
    pub mcu_cycles: u64,
    /// Synchronization counters.
    pub sync: SyncCounters,
}

impl Default for BridgeStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            frames: 0,
            instructions: 0,
            mcu_cycles: 0,
            sync: SyncCounters::default(),
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"sync"`. Pass an empty slice to `print_sections` to
/// print both.
pub const STATS_SECTIONS: &[&str] = &["summary", "sync"];

impl BridgeStats {
    /// Average MCU cycles per peer tick, or `None` before the first tick.
    pub fn cycles_per_tick(&self) -> Option<u64> {
        self.mcu_cycles.checked_div(self.sync.ticks)
    }

    /// Prints every section to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64().max(f64::EPSILON);

        if want("summary") {
            let mhz = (self.mcu_cycles as f64 / seconds) / 1_000_000.0;
            let fps = self.frames as f64 / seconds;
            println!("\n==========================================================");
            println!("IEC BRIDGE STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("frames                   {}", self.frames);
            println!("frames_per_second        {fps:.2}");
            println!("mcu_instructions         {}", self.instructions);
            println!("mcu_cycles               {}", self.mcu_cycles);
            println!("mcu_freq                 {mhz:.2} MHz");
            println!("----------------------------------------------------------");
        }

        if want("sync") {
            let total = self.sync.pushes + self.sync.pushes_suppressed;
            let suppressed = if total == 0 {
                0.0
            } else {
                self.sync.pushes_suppressed as f64 / total as f64 * 100.0
            };
            println!("SYNCHRONIZATION");
            println!("  peer_ticks             {}", self.sync.ticks);
            match self.cycles_per_tick() {
                Some(cpt) => println!("  cycles_per_tick        {cpt}"),
                None => println!("  cycles_per_tick        n/a"),
            }
            println!("  bus_pushes             {}", self.sync.pushes);
            println!(
                "  pushes_suppressed      {} ({suppressed:.2}%)",
                self.sync.pushes_suppressed
            );
            println!("  ticks_collapsed        {}", self.sync.ticks_collapsed);
            println!("  trace_markers          {}", self.sync.markers);
            println!("==========================================================");
        }
    }
}
