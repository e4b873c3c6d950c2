use clap::{Arg, Command};
use ld19_driver::{run_driver, DriverOptions};

fn get_port_name() -> String {
    let matches = Command::new("LD19 data receiver.")
        .about("Reads rotations from an LD19 lidar.")
        .disable_version_flag(true)
        .arg(
            Arg::new("port")
                .help("The device path to a serial port")
                .required(true),
        )
        .get_matches();

    let port_name: &String = matches.get_one("port").unwrap();
    port_name.to_string()
}

fn main() {
    let port_name = get_port_name();

    let (driver_threads, rotation_rx) = run_driver(&port_name, DriverOptions::default()).unwrap();

    loop {
        let rotation = match rotation_rx.recv() {
            Ok(rotation) => rotation,
            Err(_) => break,
        };
        println!(
            "rotation: {} points, crc_ok = {}",
            rotation.len(),
            rotation.crc_ok
        );
        for point in rotation.points.iter().take(5) {
            println!(
                "  {:7.2} deg  {:5} mm  intensity {}",
                point.angle_deg, point.distance_mm, point.intensity
            );
        }
    }

    drop(driver_threads);
}
