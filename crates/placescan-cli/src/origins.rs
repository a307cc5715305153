use placescan_core::SearchSettings;
use placescan_sweep::{generate_origins, haversine_miles};

/// Print the origins a sweep would query at `level`, one per line.
pub(crate) fn print_origins(settings: &SearchSettings, level: u32) {
    println!(
        "level {level} origins for center {} (radius {} mi):",
        settings.center, settings.radius_miles
    );
    for line in origin_lines(settings, level) {
        println!("{line}");
    }
}

fn origin_lines(settings: &SearchSettings, level: u32) -> Vec<String> {
    generate_origins(settings.center, settings.radius_miles, level)
        .into_iter()
        .enumerate()
        .map(|(idx, origin)| {
            let offset = haversine_miles(settings.center, origin);
            format!("{:>3}  {origin}  {offset:>6.1} mi from center", idx + 1)
        })
        .collect()
}
