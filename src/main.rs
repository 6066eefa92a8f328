use backdrop::{AppConfig, Overlay, Section, run};

fn main() {
    let sections = vec![
        Section::new("home", 0.0, 800.0),
        Section::new("projects", 800.0, 900.0),
        Section::new("about", 1700.0, 700.0),
        Section::new("contact", 2400.0, 800.0),
    ];
    let overlay = Overlay::new("Ada", "Quinn", "CREATIVE DEVELOPER");

    run(
        AppConfig::new().title("Ada Quinn").size(1280, 720),
        Some(overlay),
        sections,
    );
}
