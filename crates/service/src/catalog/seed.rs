//! Sample catalog written by `POST /seed`.

use models::{Category, Provider, Service};

pub fn sample_categories() -> Vec<Category> {
    vec![
        Category::new("Plumbing", "Fix leaks, install fixtures", "🚰"),
        Category::new("Electrical", "Wiring, lighting, panels", "💡"),
        Category::new("Cleaning", "Home & office cleaning", "🧼"),
        Category::new("Painting", "Interior & exterior", "🎨"),
        Category::new("Moving", "Pack & move", "📦"),
    ]
}

pub fn sample_providers() -> Vec<Provider> {
    vec![
        Provider::new("Spark Electric Co.", "Electrical", "Seattle", "Certified electricians for residential & commercial.", 4.8),
        Provider::new("BlueWave Plumbing", "Plumbing", "Portland", "24/7 emergency plumbing services.", 4.7),
        Provider::new("ProClean Team", "Cleaning", "San Francisco", "Eco-friendly cleaning solutions.", 4.6),
        Provider::new("ColorCraft Painters", "Painting", "Austin", "Quality finishes that last.", 4.9),
        Provider::new("Swift Movers", "Moving", "Denver", "Stress-free moves, local & long distance.", 4.5),
    ]
}

/// Services for the "top selling" section.
pub fn sample_services() -> Vec<Service> {
    vec![
        Service::new("Outlet Installation", "Electrical", 120.0, "Install a new outlet", 42),
        Service::new("Faucet Replacement", "Plumbing", 90.0, "Replace a faucet", 55),
        Service::new("Deep Cleaning", "Cleaning", 200.0, "Whole-home deep clean", 68),
        Service::new("Room Painting", "Painting", 350.0, "Paint a standard room", 40),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Document;

    #[test]
    fn sample_data_is_valid() {
        assert!(sample_categories().iter().all(|c| c.validate().is_ok()));
        assert!(sample_providers().iter().all(|p| p.validate().is_ok()));
        assert!(sample_services().iter().all(|s| s.validate().is_ok()));
    }

    #[test]
    fn providers_reference_seeded_categories() {
        let categories: Vec<String> = sample_categories().into_iter().map(|c| c.name).collect();
        assert!(sample_providers().iter().all(|p| categories.contains(&p.category)));
    }
}
