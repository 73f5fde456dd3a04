//! Declarative scene content
//!
//! The resume data behind the solar system: one planet per biographical
//! section, a handful of project probes, and decorative interstellar objects.
//! Pure configuration; the interaction core only ever sees planets as opaque
//! selection payloads.

use std::sync::Arc;

/// Biographical section a planet represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Summary,
    Skills,
    Experience,
    Values,
    Education,
    Certifications,
    Contact,
}

/// Rough surface treatment, used to pick material parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Rock,
    Gas,
    Ice,
    Earth,
}

#[derive(Debug, Clone)]
pub struct SectionContent {
    pub title: &'static str,
    pub items: &'static [&'static str],
    pub details: Option<&'static str>,
}

/// One orbiting resume section. Returned verbatim as the selection payload
/// when the user pinch-clicks the planet.
#[derive(Debug, Clone)]
pub struct PlanetData {
    pub section: Section,
    pub name: &'static str,
    pub description: &'static str,
    /// Orbit radius from the sun.
    pub distance: f32,
    /// Radius relative to earth.
    pub size: f32,
    /// Base orbit speed.
    pub speed: f32,
    pub color: [f32; 3],
    pub surface: Surface,
    pub ring: bool,
    pub content: SectionContent,
}

/// A project shown as a drifting space probe.
#[derive(Debug, Clone)]
pub struct ProbeData {
    pub name: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub distance: f32,
    pub speed: f32,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrifterKind {
    Comet,
    Artifact,
}

/// A decorative interstellar visitor on a bounded parametric path.
#[derive(Debug, Clone)]
pub struct DrifterData {
    pub name: &'static str,
    pub kind: DrifterKind,
    /// Per-axis trajectory amplitudes.
    pub trajectory: [f32; 3],
    pub details: &'static str,
}

/// Convert a 0xRRGGBB color to linear-ish rgb floats.
fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

pub fn planets() -> Vec<Arc<PlanetData>> {
    vec![
        Arc::new(PlanetData {
            section: Section::Summary,
            name: "Mercury (Summary)",
            description: "The core philosophy",
            distance: 10.0,
            size: 0.8,
            speed: 0.8,
            color: rgb(0xa1a1aa),
            surface: Surface::Rock,
            ring: false,
            content: SectionContent {
                title: "Professional Summary",
                items: &[
                    "Systems engineer with a focus on real-time interactive graphics.",
                    "Grew from small tooling into full engine and interaction work.",
                    "Stack: Rust, wgpu, and native windowing for fast, modern UX.",
                    "Interfaces are the connection between program logic and people.",
                ],
                details: None,
            },
        }),
        Arc::new(PlanetData {
            section: Section::Skills,
            name: "Venus (Skills)",
            description: "Technical arsenal",
            distance: 16.0,
            size: 1.2,
            speed: 0.6,
            color: rgb(0xfbbf24),
            surface: Surface::Gas,
            ring: false,
            content: SectionContent {
                title: "Top Skills",
                items: &[
                    "Rust & systems programming",
                    "Real-time rendering (wgpu)",
                    "Interaction design & input handling",
                    "3D math and camera systems",
                    "Version control (Git)",
                ],
                details: None,
            },
        }),
        Arc::new(PlanetData {
            section: Section::Experience,
            name: "Earth (Experience)",
            description: "Professional journey",
            distance: 24.0,
            size: 1.5,
            speed: 0.4,
            color: rgb(0x3b82f6),
            surface: Surface::Earth,
            ring: false,
            content: SectionContent {
                title: "Work Experience",
                items: &[
                    "Role: Graphics / Systems Engineer",
                    "Focus: engines, tooling, and interactive visualization",
                    "Impact: dependable technical foundations for critical products.",
                ],
                details: Some(
                    "Not just delivered code: a scalable foundation that supports \
                     long-term growth.",
                ),
            },
        }),
        Arc::new(PlanetData {
            section: Section::Values,
            name: "Mars (Values)",
            description: "Core principles",
            distance: 32.0,
            size: 1.1,
            speed: 0.3,
            color: rgb(0xef4444),
            surface: Surface::Rock,
            ring: false,
            content: SectionContent {
                title: "Development Values",
                items: &[
                    "Fast: profiled and optimized for rapid response.",
                    "Engineered: clean, maintainable, and scalable code.",
                    "User-centered: guided by strong UX principles.",
                ],
                details: None,
            },
        }),
        Arc::new(PlanetData {
            section: Section::Education,
            name: "Jupiter (Education)",
            description: "Academic foundation",
            distance: 45.0,
            size: 3.5,
            speed: 0.15,
            color: rgb(0xea580c),
            surface: Surface::Gas,
            ring: false,
            content: SectionContent {
                title: "Education History",
                items: &[
                    "BS Computer Science",
                    "Associate's degree in computer science",
                ],
                details: None,
            },
        }),
        Arc::new(PlanetData {
            section: Section::Certifications,
            name: "Saturn (Certs)",
            description: "Qualifications",
            distance: 60.0,
            size: 3.0,
            speed: 0.1,
            color: rgb(0xfcd34d),
            surface: Surface::Gas,
            ring: true,
            content: SectionContent {
                title: "Certifications",
                items: &[
                    "Systems programming",
                    "Computer graphics",
                    "Version control",
                ],
                details: None,
            },
        }),
        Arc::new(PlanetData {
            section: Section::Contact,
            name: "Neptune (Contact)",
            description: "Get in touch",
            distance: 75.0,
            size: 2.8,
            speed: 0.08,
            color: rgb(0x6366f1),
            surface: Surface::Ice,
            ring: false,
            content: SectionContent {
                title: "Contact Information",
                items: &["Email: hello@example.dev", "Web: example.dev"],
                details: Some(
                    "Let's turn your vision into a high-performing solution.",
                ),
            },
        }),
    ]
}

pub fn probes() -> Vec<ProbeData> {
    vec![
        ProbeData {
            name: "Cosmic Portfolio",
            description: "A 3D interactive portfolio",
            technologies: &["Rust", "wgpu", "winit"],
            distance: 42.0,
            speed: 0.2,
            color: rgb(0x67e8f9),
        },
        ProbeData {
            name: "Nebula Dashboard",
            description: "Analytics dashboard with real-time data",
            technologies: &["Rust", "imgui"],
            distance: 58.0,
            speed: 0.15,
            color: rgb(0xc4b5fd),
        },
        ProbeData {
            name: "Stellar Chat",
            description: "Real-time chat application",
            technologies: &["Rust", "tokio"],
            distance: 70.0,
            speed: 0.12,
            color: rgb(0x86efac),
        },
    ]
}

pub fn drifters() -> Vec<DrifterData> {
    vec![
        DrifterData {
            name: "Oumuamua (Innovation)",
            kind: DrifterKind::Artifact,
            trajectory: [40.0, 20.0, -50.0],
            details: "Representing unique problem-solving approaches.",
        },
        DrifterData {
            name: "2I/Borisov (Speed)",
            kind: DrifterKind::Comet,
            trajectory: [-60.0, -30.0, 20.0],
            details: "Symbolizing high-performance execution.",
        },
        DrifterData {
            name: "3I/Atlas (Project)",
            kind: DrifterKind::Artifact,
            trajectory: [-30.0, 40.0, 40.0],
            details: "A dimension-defying immersive spatial interface.",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_unpacks_channels() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x00ff00), [0.0, 1.0, 0.0]);
        assert_eq!(rgb(0x0000ff), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn planet_orbits_are_ordered_outward() {
        let planets = planets();
        for pair in planets.windows(2) {
            assert!(pair[0].distance < pair[1].distance);
        }
    }
}
