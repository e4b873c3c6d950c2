use clap::{Arg, Command};
use ld19_driver::{run_driver, DriverOptions};

fn get_port_name() -> String {
    let matches = Command::new("LD19 JSON dumper.")
        .about("Reads rotations from an LD19 lidar and prints them as JSON lines.")
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
        println!("{}", serde_json::to_string(&rotation).unwrap());
    }

    drop(driver_threads);
}
