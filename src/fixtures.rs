use crate::models::Event;

struct Demo {
    id: &'static str,
    title: &'static str,
    date: &'static str,
    time: &'static str,
    location: &'static str,
    category: &'static str,
    attendees: i64,
    price: f64,
    image_url: &'static str,
    tags: [&'static str; 2],
    featured: bool,
}

const DEMO_EVENTS: [Demo; 8] = [
    Demo {
        id: "1",
        title: "Tech Conference 2025",
        date: "May 15, 2025",
        time: "9:00 AM - 5:00 PM",
        location: "Silicon Valley Convention Center",
        category: "Technology",
        attendees: 1250,
        price: 299.0,
        image_url: "https://images.unsplash.com/photo-1540575467063-178a50c2df87",
        tags: ["Conference", "Networking"],
        featured: true,
    },
    Demo {
        id: "2",
        title: "Summer Music Festival",
        date: "June 21, 2025",
        time: "12:00 PM - 11:00 PM",
        location: "Central Park, New York",
        category: "Music",
        attendees: 5000,
        price: 150.0,
        image_url: "https://images.unsplash.com/photo-1501386761578-eac5c94b800a",
        tags: ["Festival", "Concert"],
        featured: true,
    },
    Demo {
        id: "3",
        title: "International Food Fair",
        date: "July 8, 2025",
        time: "All Day",
        location: "Downtown Food District",
        category: "Food & Drink",
        attendees: 3200,
        price: 45.0,
        image_url: "https://images.unsplash.com/photo-1555939594-58d7cb561ad1",
        tags: ["Food", "Festival"],
        featured: false,
    },
    Demo {
        id: "4",
        title: "Business Leadership Summit",
        date: "August 5-6, 2025",
        time: "8:00 AM - 4:00 PM",
        location: "Grand Hyatt Hotel",
        category: "Business",
        attendees: 750,
        price: 499.0,
        image_url: "https://images.unsplash.com/photo-1591115765373-5207764f72e4",
        tags: ["Business", "Leadership"],
        featured: true,
    },
    Demo {
        id: "5",
        title: "Web3 Developers Meetup",
        date: "June 10, 2025",
        time: "6:30 PM - 9:00 PM",
        location: "Tech Hub Downtown",
        category: "Technology",
        attendees: 85,
        price: 0.0,
        image_url: "https://images.unsplash.com/photo-1591115765373-5207764f72e4",
        tags: ["Meetup", "Technology"],
        featured: false,
    },
    Demo {
        id: "6",
        title: "City Marathon 2025",
        date: "July 1, 2025",
        time: "7:00 AM",
        location: "City Center",
        category: "Sports & Fitness",
        attendees: 2500,
        price: 75.0,
        image_url: "https://images.unsplash.com/photo-1530549387789-4c1017266635",
        tags: ["Marathon", "Sports"],
        featured: false,
    },
    Demo {
        id: "7",
        title: "Art Gallery Exhibition",
        date: "July 15, 2025",
        time: "10:00 AM - 6:00 PM",
        location: "Modern Art Museum",
        category: "Arts & Culture",
        attendees: 450,
        price: 25.0,
        image_url: "https://images.unsplash.com/photo-1531058020387-3be344556be6",
        tags: ["Art", "Exhibition"],
        featured: false,
    },
    Demo {
        id: "8",
        title: "Global Marketing Conference",
        date: "August 22, 2025",
        time: "9:00 AM - 5:00 PM",
        location: "Marina Bay Convention",
        category: "Business",
        attendees: 950,
        price: 350.0,
        image_url: "https://images.unsplash.com/photo-1552664730-d307ca884978",
        tags: ["Conference", "Marketing"],
        featured: false,
    },
];

/// Built-in demo events used to seed an empty database.
pub fn demo_events() -> Vec<Event> {
    DEMO_EVENTS
        .iter()
        .map(|d| Event {
            id: d.id.to_string(),
            title: d.title.to_string(),
            description: format!("{} at {}.", d.title, d.location),
            date: d.date.to_string(),
            time: d.time.to_string(),
            location: d.location.to_string(),
            category: d.category.to_string(),
            image_url: d.image_url.to_string(),
            organizer_id: None,
            organizer_name: None,
            price: d.price,
            attendees: d.attendees,
            max_attendees: None,
            tags: d.tags.iter().map(|t| t.to_string()).collect(),
            featured: d.featured,
            created_at: "2025-01-15T00:00:00Z".to_string(),
        })
        .collect()
}
