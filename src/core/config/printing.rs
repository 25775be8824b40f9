use crate::core::config::data::{path_display, Config};
use crate::core::config::defaults::SettingsOverrides;

impl Config {
    pub fn print_all(&self) {
        let effective = self.resolve(SettingsOverrides::default());
        println!("Current configuration:");
        print_entry("endpoint", self.endpoint.is_some(), &effective.endpoint);
        print_entry("model", self.model.is_some(), &effective.model);
        print_entry(
            "transcript",
            self.transcript.is_some(),
            &path_display(&effective.transcript_path),
        );
        match effective.mouse_enabled {
            true => print_entry("mouse", self.mouse.is_some(), "on"),
            false => print_entry("mouse", self.mouse.is_some(), "off"),
        }
        match &effective.log_file {
            Some(path) => println!("  log-file: {}", path_display(path)),
            None => println!("  log-file: (unset)"),
        }
    }
}

fn print_entry(key: &str, is_set: bool, value: &str) {
    if is_set {
        println!("  {key}: {value}");
    } else {
        println!("  {key}: {value} (default)");
    }
}
