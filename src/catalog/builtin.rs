//! The catalog compiled into the binary.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use super::{FEATURED_COUNT, GuideCatalogProvider};
use crate::models::GuideItem;

fn steps(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

fn featured_guides() -> Vec<GuideItem> {
    vec![
        GuideItem::new(
            "How to Build an iOS App",
            "Complete guide to building your first iOS application using SwiftUI.",
            steps(&[
                "Install Xcode from the Mac App Store.",
                "Create a new project using the iOS App template.",
                "Design your UI using SwiftUI's declarative syntax.",
                "Implement your app logic using Swift.",
                "Test on simulator and real device.",
                "Submit to App Store when ready.",
            ]),
            Some("https://developer.apple.com/tutorials/app-dev-training".to_string()),
        ),
        GuideItem::new(
            "How to Cook Perfect Pasta",
            "Master the art of cooking pasta al dente.",
            steps(&[
                "Bring large pot of salted water to rolling boil.",
                "Add pasta and stir immediately to prevent sticking.",
                "Cook 1-2 minutes less than package directions.",
                "Reserve 1 cup pasta water before draining.",
                "Finish pasta in sauce with reserved water.",
            ]),
            Some("https://www.seriouseats.com/how-to-cook-pasta".to_string()),
        ),
        GuideItem::new(
            "How to Start Investing",
            "Learn the basics of investing and building wealth.",
            steps(&[
                "Assess your financial situation and goals.",
                "Build an emergency fund (3-6 months expenses).",
                "Start with index funds or ETFs for diversification.",
                "Open a brokerage account or use a robo-advisor.",
                "Set up automatic contributions.",
                "Review and rebalance your portfolio regularly.",
            ]),
            Some("https://www.investor.gov/introduction-investing/getting-started".to_string()),
        ),
        GuideItem::new(
            "How to Learn a New Language",
            "Proven strategies to become fluent.",
            steps(&[
                "Choose a language you're passionate about.",
                "Use apps like Duolingo or Babbel for basics.",
                "Practice daily, even if just 15 minutes.",
                "Immerse yourself with movies, music, and books.",
                "Find a conversation partner or tutor.",
                "Travel to a country where it's spoken (if possible).",
                "Be patient and celebrate small wins.",
            ]),
            Some("https://www.fluentu.com/blog/learn-new-language-fast".to_string()),
        ),
        GuideItem::new(
            "How to Improve Your Photography",
            "Take stunning photos with professional tips.",
            steps(&[
                "Learn basic composition rules (rule of thirds, leading lines).",
                "Understand your camera's settings (ISO, aperture, shutter).",
                "Shoot during golden hour for best natural light.",
                "Practice framing and finding interesting angles.",
                "Edit your photos to enhance (not over-edit).",
                "Study great photographers for inspiration.",
                "Take lots of photos - practice makes perfect.",
            ]),
            Some("https://photographylife.com/photography-tips-for-beginners".to_string()),
        ),
    ]
}

fn additional_guides() -> Vec<GuideItem> {
    vec![
        GuideItem::new(
            "How to Brew an Espresso",
            "Fast, balanced shot using a home machine.",
            steps(&[
                "Preheat machine and portafilter 10–15 minutes.",
                "Grind 18g coffee; aim for fine, table-salt texture.",
                "Distribute & tamp level (≈30 lbs).",
                "Lock in; start shot. Target 36–40g out in 25–30s.",
                "Taste; adjust grind/timing for balance.",
            ]),
            Some("https://en.wikipedia.org/wiki/Espresso".to_string()),
        ),
        GuideItem::new(
            "How to Change a Flat Tire",
            "Safe roadside swap in under 15 minutes.",
            steps(&[
                "Park safe; hazards on; engage parking brake.",
                "Loosen lug nuts 1/4 turn before lifting.",
                "Jack at the pinch weld; lift until tire clears.",
                "Remove nuts & wheel; mount spare; hand-tighten.",
                "Lower; torque in star pattern; stow tools; check PSI.",
            ]),
            None,
        ),
    ]
}

/// Five featured guides plus a couple of extra search-only guides.
///
/// Ids are assigned once at construction, so repeated fetches return the
/// same guides.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    featured: Vec<GuideItem>,
    additional: Vec<GuideItem>,
    latency: Duration,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self { featured: featured_guides(), additional: additional_guides(), latency: Duration::ZERO }
    }

    /// Delay every fetch by `latency`, standing in for a remote catalog
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            debug!(latency_ms = self.latency.as_millis() as u64, "simulating catalog latency");
            thread::sleep(self.latency);
        }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl GuideCatalogProvider for BuiltinCatalog {
    fn fetch_featured(&self) -> Result<Vec<GuideItem>> {
        self.simulate_latency();
        Ok(self.featured.clone())
    }

    fn fetch_all(&self) -> Result<Vec<GuideItem>> {
        self.simulate_latency();
        Ok(self.featured.iter().chain(&self.additional).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_featured_has_five_complete_guides() {
        let featured = BuiltinCatalog::new().fetch_featured().unwrap();
        assert_eq!(featured.len(), FEATURED_COUNT);
        assert!(featured.iter().all(|g| !g.title.is_empty() && !g.summary.is_empty()));
        assert!(featured.iter().all(|g| !g.steps.is_empty()));
    }

    #[test]
    fn test_featured_ids_are_unique() {
        let featured = BuiltinCatalog::new().fetch_featured().unwrap();
        let ids: HashSet<_> = featured.iter().map(|g| g.id).collect();
        assert_eq!(ids.len(), featured.len());
    }

    #[test]
    fn test_all_starts_with_featured() {
        let catalog = BuiltinCatalog::new();
        let featured = catalog.fetch_featured().unwrap();
        let all = catalog.fetch_all().unwrap();
        assert_eq!(all.len(), 7);
        assert_eq!(&all[..FEATURED_COUNT], &featured[..]);
        assert_eq!(all[6].title, "How to Change a Flat Tire");
    }

    #[test]
    fn test_fetches_are_stable() {
        let catalog = BuiltinCatalog::new();
        assert_eq!(catalog.fetch_all().unwrap(), catalog.fetch_all().unwrap());
    }

    #[test]
    fn test_latency_is_applied() {
        let catalog = BuiltinCatalog::new().with_latency(Duration::from_millis(20));
        let start = Instant::now();
        catalog.fetch_featured().unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
