//! Sample tours and about page content for a new site.

use serde::Serialize;
use tracing::info;

use super::Storage;
use crate::error::Result;
use crate::model::{Highlights, SectionInput, StatInput, TeamMemberInput, TourInput, ValueInput};

struct SampleTour {
    title: &'static str,
    destination: &'static str,
    duration: &'static str,
    price: f64,
    image: &'static str,
    category_id: i64,
    description: &'static str,
    route: &'static str,
    highlights: &'static str,
    featured: bool,
}

const SAMPLE_TOURS: &[SampleTour] = &[
    SampleTour {
        title: "Himalayan Adventure Trek",
        destination: "Nepal",
        duration: "15 days",
        price: 1899.0,
        image: "/images/himalayas.jpg",
        category_id: 1,
        description: "Experience the breathtaking beauty of the Himalayas with our expert guides.",
        route: "Kathmandu to Everest Base Camp",
        highlights: "Everest Base Camp,Sherpa Culture,Mountain Views,Ancient Monasteries",
        featured: true,
    },
    SampleTour {
        title: "African Safari Experience",
        destination: "Kenya & Tanzania",
        duration: "12 days",
        price: 2499.0,
        image: "/images/safari.jpg",
        category_id: 3,
        description: "Witness the Great Migration and explore the wild heart of Africa.",
        route: "Nairobi to Serengeti",
        highlights: "Big Five,Great Migration,Maasai Culture,Serengeti",
        featured: true,
    },
    SampleTour {
        title: "Mystical India Journey",
        destination: "India",
        duration: "14 days",
        price: 1699.0,
        image: "/images/india.jpg",
        category_id: 2,
        description: "Discover the rich heritage and diverse culture of incredible India.",
        route: "Delhi to Mumbai",
        highlights: "Taj Mahal,Rajasthan Palaces,Spiritual Sites,Local Cuisine",
        featured: true,
    },
    SampleTour {
        title: "European Grand Tour",
        destination: "Europe",
        duration: "21 days",
        price: 3299.0,
        image: "/images/europe.jpg",
        category_id: 5,
        description: "Explore the historic cities and cultural treasures of Europe.",
        route: "London to Rome",
        highlights: "Historic Cities,Art Museums,Local Cuisine,Architecture",
        featured: false,
    },
    SampleTour {
        title: "Amazon Rainforest Expedition",
        destination: "Brazil",
        duration: "10 days",
        price: 2199.0,
        image: "/images/amazon.jpg",
        category_id: 4,
        description: "Dive deep into the world's largest rainforest ecosystem.",
        route: "Manaus to Iquitos",
        highlights: "Wildlife Spotting,River Cruises,Indigenous Culture,Biodiversity",
        featured: false,
    },
    SampleTour {
        title: "Southeast Asian Discovery",
        destination: "Thailand & Vietnam",
        duration: "18 days",
        price: 2099.0,
        image: "/images/southeast-asia.jpg",
        category_id: 2,
        description: "Experience the vibrant cultures and stunning landscapes of Southeast Asia.",
        route: "Bangkok to Ho Chi Minh City",
        highlights: "Ancient Temples,Street Food,Floating Markets,Beach Relaxation",
        featured: false,
    },
];

/// (key, admin title, text, order)
const SAMPLE_SECTIONS: &[(&str, &str, &str, i64)] = &[
    ("hero_title", "Hero Title", "About Soul Trip", 1),
    ("hero_subtitle", "Hero Subtitle", "Creating unforgettable travel experiences since 2025", 2),
    ("story_title", "Our Story Title", "Our Story", 3),
    (
        "story_content",
        "Our Story Content",
        "Soul Trip Tours and Travels was born from a passion for adventure and a deep belief that travel has the power to transform lives. Founded in 2025, we've been dedicated to creating small group & large group adventures that bring the world closer and create lasting connections between travelers and destinations.",
        4,
    ),
    ("mission_title", "Mission Title", "Our Mission", 5),
    (
        "mission_content",
        "Mission Content",
        "We believe that travel should be more than just visiting places. It should be about connecting with cultures, understanding different perspectives, and creating memories that last a lifetime. Our mission is to provide authentic, immersive travel experiences that respect local communities and environments.",
        6,
    ),
    ("values_title", "Values Title", "Our Values", 7),
    (
        "values_subtitle",
        "Values Subtitle",
        "These core principles guide everything we do and shape the way we approach travel.",
        8,
    ),
];

/// (name, position, bio, portrait)
const SAMPLE_TEAM: &[(&str, &str, &str, &str)] = &[
    (
        "Sammi Akter",
        "Founder & Proprietor",
        "With over 15 years of travel industry experience, Sammi Akter founded Soul Trip to create meaningful travel experiences that connect people and cultures.",
        "/images/sammi-mam.jpg",
    ),
    (
        "Sarah Chen",
        "Operations Director",
        "Sarah ensures every detail of your trip runs smoothly. Her expertise in logistics and local partnerships makes magic happen behind the scenes.",
        "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&q=80",
    ),
    (
        "Marcus Rodriguez",
        "Adventure Specialist",
        "Marcus designs our most thrilling adventures. His passion for outdoor activities and cultural exploration creates unforgettable experiences.",
        "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&q=80",
    ),
];

const SAMPLE_STATS: &[(&str, &str, &str)] = &[
    ("travelers", "5000+", "Happy Travelers"),
    ("destinations", "50+", "Destinations"),
    ("rating", "4.9", "Average Rating"),
    ("tours", "100+", "Tour Options"),
];

const SAMPLE_VALUES: &[(&str, &str, &str)] = &[
    (
        "Authentic Experiences",
        "We believe in genuine connections and authentic cultural exchanges that go beyond typical tourist experiences.",
        "fas fa-heart",
    ),
    (
        "Responsible Tourism",
        "Every trip is designed to benefit local communities and minimize environmental impact while maximizing positive change.",
        "fas fa-leaf",
    ),
    (
        "Community Focus",
        "We work closely with local communities to ensure our tours provide meaningful economic benefits and cultural exchange.",
        "fas fa-users",
    ),
    (
        "Excellence",
        "We're committed to delivering exceptional service and unforgettable experiences that exceed expectations.",
        "fas fa-star",
    ),
    (
        "Safety First",
        "Your safety and security are our top priorities. We maintain the highest safety standards in all our operations.",
        "fas fa-shield-alt",
    ),
    (
        "Trust & Transparency",
        "We believe in honest communication, fair pricing, and transparent business practices in all our dealings.",
        "fas fa-handshake",
    ),
];

/// Rows inserted by [`Storage::seed_sample_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Tours added.
    pub tours: usize,
    /// About sections added.
    pub sections: usize,
    /// Team members added.
    pub team: usize,
    /// Statistics added.
    pub stats: usize,
    /// Core values added.
    pub values: usize,
}

impl SeedReport {
    /// Total rows added.
    #[must_use]
    pub fn total(&self) -> usize {
        self.tours + self.sections + self.team + self.stats + self.values
    }
}

impl Storage {
    /// Insert the sample tours and about page content.
    ///
    /// Each table is filled only when it is empty, so running this twice adds
    /// nothing the second time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn seed_sample_data(&self) -> Result<SeedReport> {
        let tx = self.conn.unchecked_transaction()?;
        let mut report = SeedReport::default();

        if self.is_empty("tours")? {
            for tour in SAMPLE_TOURS {
                self.create_tour(TourInput {
                    title: tour.title.to_string(),
                    description: tour.description.to_string(),
                    price: Some(tour.price),
                    duration: tour.duration.to_string(),
                    destination: tour.destination.to_string(),
                    category_id: Some(tour.category_id),
                    highlights: Highlights::Text(tour.highlights.to_string()),
                    image: Some(tour.image.to_string()),
                    route: Some(tour.route.to_string()),
                    status: None,
                    featured: Some(tour.featured),
                })?;
                report.tours += 1;
            }
        }

        if self.is_empty("about_content")? {
            for (key, title, content, order) in SAMPLE_SECTIONS {
                self.add_section(&SectionInput {
                    section_key: Some((*key).to_string()),
                    section_title: Some((*title).to_string()),
                    content: Some((*content).to_string()),
                    image_url: None,
                    order_index: Some(*order),
                })?;
                report.sections += 1;
            }
        }

        if self.is_empty("about_team")? {
            for (order, (name, position, bio, image)) in (1..).zip(SAMPLE_TEAM) {
                self.add_team_member(&TeamMemberInput {
                    name: Some((*name).to_string()),
                    position: Some((*position).to_string()),
                    bio: Some((*bio).to_string()),
                    image_url: Some((*image).to_string()),
                    order_index: Some(order),
                })?;
                report.team += 1;
            }
        }

        if self.is_empty("about_stats")? {
            for (order, (key, value, label)) in (1..).zip(SAMPLE_STATS) {
                self.add_stat(&StatInput {
                    stat_key: Some((*key).to_string()),
                    stat_value: Some((*value).to_string()),
                    stat_label: Some((*label).to_string()),
                    order_index: Some(order),
                })?;
                report.stats += 1;
            }
        }

        if self.is_empty("about_values")? {
            for (order, (title, description, icon)) in (1..).zip(SAMPLE_VALUES) {
                self.add_value(&ValueInput {
                    title: Some((*title).to_string()),
                    description: Some((*description).to_string()),
                    icon: Some((*icon).to_string()),
                    order_index: Some(order),
                })?;
                report.values += 1;
            }
        }

        tx.commit()?;
        info!("Seeded {} sample rows", report.total());
        Ok(report)
    }

    fn is_empty(&self, table: &str) -> Result<bool> {
        let count: i64 =
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count == 0)
    }
}
