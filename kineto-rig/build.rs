//! Build script for kineto-rig
//!
//! - Sets up linker search paths for memory.x
//! - Validates rig.toml and bakes it into the firmware as constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Pulse widths outside this range are not hobby-servo positions
const PULSE_RANGE_US: std::ops::RangeInclusive<i64> = 400..=2600;

fn main() {
    setup_linker();
    let config = load_config();
    let source = generate_config(&config);

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("rig_config.rs"), source).unwrap();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read and parse rig.toml
fn load_config() -> toml::Value {
    println!("cargo:rerun-if-changed=rig.toml");

    let config_path = Path::new("rig.toml");

    if !config_path.exists() {
        fail("rig.toml not found", &["The firmware embeds its servo calibration from rig.toml.".to_string()]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read rig.toml", &[e.to_string()]),
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in rig.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let truncated = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Typed lookups with defaults, collecting errors as it goes
struct Reader<'a> {
    root: &'a toml::Value,
    errors: Vec<String>,
}

impl<'a> Reader<'a> {
    fn get(&self, path: &[&str]) -> Option<&'a toml::Value> {
        let mut value = self.root;
        for key in path {
            value = value.get(key)?;
        }
        Some(value)
    }

    fn int(&mut self, path: &[&str], default: i64, range: std::ops::RangeInclusive<i64>) -> i64 {
        match self.get(path) {
            None => default,
            Some(toml::Value::Integer(v)) if range.contains(v) => *v,
            Some(toml::Value::Integer(v)) => {
                self.errors.push(format!(
                    "{} = {} outside {}..={}",
                    path.join("."),
                    v,
                    range.start(),
                    range.end()
                ));
                default
            }
            Some(_) => {
                self.errors.push(format!("{} must be an integer", path.join(".")));
                default
            }
        }
    }

    fn pulse(&mut self, path: &[&str], default: i64) -> i64 {
        self.int(path, default, PULSE_RANGE_US)
    }

    fn bool(&mut self, path: &[&str], default: bool) -> bool {
        match self.get(path) {
            None => default,
            Some(toml::Value::Boolean(v)) => *v,
            Some(_) => {
                self.errors.push(format!("{} must be true or false", path.join(".")));
                default
            }
        }
    }

    fn pulses3(&mut self, path: &[&str], default: [i64; 3]) -> [i64; 3] {
        let array = match self.get(path) {
            None => return default,
            Some(toml::Value::Array(a)) if a.len() == 3 => a,
            Some(_) => {
                self.errors.push(format!("{} must be an array of 3 pulses", path.join(".")));
                return default;
            }
        };

        let mut out = default;
        for (slot, value) in out.iter_mut().zip(array) {
            match value {
                toml::Value::Integer(v) if PULSE_RANGE_US.contains(v) => *slot = *v,
                _ => self.errors.push(format!(
                    "{} entries must be pulses in {}..={}",
                    path.join("."),
                    PULSE_RANGE_US.start(),
                    PULSE_RANGE_US.end()
                )),
            }
        }
        out
    }
}

/// Validate rig.toml and render the constants module
fn generate_config(config: &toml::Value) -> String {
    let mut r = Reader {
        root: config,
        errors: Vec::new(),
    };

    let period_us = r.int(&["servo", "period_us"], 20_000, 2_600..=50_000);
    let flip = r.pulses3(&["servo", "flip_pulses_us"], [1200, 600, 1455]);

    let primary = [
        r.pulse(&["servo", "primary", "rest_us"], 2150),
        r.pulse(&["servo", "primary", "raised_us"], 986),
        r.pulse(&["servo", "primary", "tremor_us"], 1900),
    ];
    let secondary = [
        r.pulse(&["servo", "secondary", "rest_us"], 550),
        r.pulse(&["servo", "secondary", "raised_us"], 1455),
        r.pulse(&["servo", "secondary", "tremor_us"], 800),
    ];

    let ms = 0..=i64::from(u16::MAX);
    let home_settle_ms = r.int(&["motion", "home_settle_ms"], 500, ms.clone());
    let release_at_rest = r.bool(&["motion", "release_at_rest"], true);
    let ramp_step_us = r.int(&["motion", "ramp_step_us"], 5, 1..=500);
    let ramp_step_ms = r.int(&["motion", "ramp_step_ms"], 5, ms.clone());
    let fast_settle_ms = r.int(&["motion", "fast_settle_ms"], 300, ms.clone());
    let flip_step_ms = r.int(&["motion", "flip_step_ms"], 150, ms.clone());
    let tremor_blocks = r.int(&["motion", "tremor_blocks"], 5, 1..=63);
    let tremor_pulse_ms = r.int(&["motion", "tremor_pulse_ms"], 80, ms);

    if !r.errors.is_empty() {
        fail("Invalid calibration in rig.toml", &r.errors);
    }

    println!("cargo:warning=rig.toml validated successfully");

    format!(
        "// Generated from rig.toml by build.rs\n\
        \n\
        /// Servo PWM frame period (µs)\n\
        pub const SERVO_PERIOD_US: u32 = {period_us};\n\
        \n\
        /// Servo calibration\n\
        pub const SERVO_CALIBRATION: ServoCalibration = ServoCalibration {{\n    \
            primary: ChannelCalibration::new({}, {}, {}),\n    \
            secondary: ChannelCalibration::new({}, {}, {}),\n    \
            flip_pulses_us: [{}, {}, {}],\n\
        }};\n\
        \n\
        /// Motion plan timing\n\
        pub const MOTION_TIMING: MotionTiming = MotionTiming {{\n    \
            home_settle_ms: {home_settle_ms},\n    \
            release_at_rest: {release_at_rest},\n    \
            ramp_step_us: {ramp_step_us},\n    \
            ramp_step_ms: {ramp_step_ms},\n    \
            fast_settle_ms: {fast_settle_ms},\n    \
            flip_step_ms: {flip_step_ms},\n    \
            tremor_blocks: {tremor_blocks},\n    \
            tremor_pulse_ms: {tremor_pulse_ms},\n\
        }};\n",
        primary[0],
        primary[1],
        primary[2],
        secondary[0],
        secondary[1],
        secondary[2],
        flip[0],
        flip[1],
        flip[2],
    )
}
