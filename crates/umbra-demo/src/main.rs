mod controls;
mod demo;

use anyhow::Result;

use umbra_engine::device::GpuInit;
use umbra_engine::logging::{LoggingConfig, init_logging};
use umbra_engine::window::{Runtime, RuntimeConfig};

use crate::demo::ShadowDemo;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    // Startup banner, printed before the window opens.
    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║            SHADOW MAPPING              ║");
    println!("  ╠════════════════════════════════════════╣");
    println!("  ║  W / S        move light  -z / +z      ║");
    println!("  ║  A / D        move light  -x / +x      ║");
    println!("  ║  Space        raise light              ║");
    println!("  ║  Shift        lower light (min y 10)   ║");
    println!("  ║  R            reset light              ║");
    println!("  ║  Esc          quit                     ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    Runtime::run(RuntimeConfig::default(), GpuInit::uncapped(), ShadowDemo::new())
}
