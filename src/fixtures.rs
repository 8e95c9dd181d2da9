use crate::bookings::bookings::{Booking, BookingStatus, ContactDetails};
use crate::catalog::{Car, CarCategory};

fn features(list: &[&str]) -> Vec<String> {
    list.iter().map(|f| f.to_string()).collect()
}

// Sample fleet standing in for the real backend catalog.
pub fn fleet() -> Vec<Car> {
    vec![
        Car {
            id: "1".to_string(),
            brand: "BMW".to_string(),
            model: "X5".to_string(),
            category: CarCategory::SUV,
            price_per_day: 120.0,
            image: "https://images.unsplash.com/photo-1555215695-3004980ad54e?w=500&h=300&fit=crop&crop=center".to_string(),
            availability: true,
            description: "Luxury SUV with premium comfort and advanced safety features. Perfect for family trips and business travel.".to_string(),
            features: features(&["Leather Seats", "GPS Navigation", "Bluetooth", "Backup Camera", "Premium Sound", "Sunroof"]),
            year: 2023,
            fuel: "Gasoline".to_string(),
            transmission: "Automatic".to_string(),
            seats: 7,
            location: "New York".to_string(),
        },
        Car {
            id: "2".to_string(),
            brand: "Mercedes".to_string(),
            model: "C-Class".to_string(),
            category: CarCategory::Sedan,
            price_per_day: 95.0,
            image: "https://images.unsplash.com/photo-1618843479313-40f8afb4b4d8?w=500&h=300&fit=crop&crop=center".to_string(),
            availability: true,
            description: "Executive sedan combining luxury, performance, and efficiency for the discerning traveler.".to_string(),
            features: features(&["Leather Seats", "GPS Navigation", "Bluetooth", "Climate Control", "Premium Sound"]),
            year: 2023,
            fuel: "Gasoline".to_string(),
            transmission: "Automatic".to_string(),
            seats: 5,
            location: "Los Angeles".to_string(),
        },
        Car {
            id: "3".to_string(),
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            category: CarCategory::Sedan,
            price_per_day: 55.0,
            image: "https://images.unsplash.com/photo-1621007947382-bb3c3994e3fb?w=500&h=300&fit=crop&crop=center".to_string(),
            availability: true,
            description: "Reliable and fuel-efficient sedan perfect for city driving and daily commutes.".to_string(),
            features: features(&["GPS Navigation", "Bluetooth", "Backup Camera", "Climate Control"]),
            year: 2022,
            fuel: "Gasoline".to_string(),
            transmission: "Automatic".to_string(),
            seats: 5,
            location: "Chicago".to_string(),
        },
        Car {
            id: "4".to_string(),
            brand: "Audi".to_string(),
            model: "Q7".to_string(),
            category: CarCategory::SUV,
            price_per_day: 140.0,
            image: "https://images.unsplash.com/photo-1544636331-e26879cd4d9b?w=500&h=300&fit=crop&crop=center".to_string(),
            availability: false,
            description: "Premium luxury SUV with cutting-edge technology and spacious interior.".to_string(),
            features: features(&["Leather Seats", "GPS Navigation", "Bluetooth", "Panoramic Sunroof", "Premium Sound", "360° Camera"]),
            year: 2023,
            fuel: "Gasoline".to_string(),
            transmission: "Automatic".to_string(),
            seats: 7,
            location: "Miami".to_string(),
        },
        Car {
            id: "5".to_string(),
            brand: "Honda".to_string(),
            model: "Civic".to_string(),
            category: CarCategory::Hatchback,
            price_per_day: 45.0,
            image: "https://images.unsplash.com/photo-1590362891991-f776e747a588?w=500&h=300&fit=crop&crop=center".to_string(),
            availability: true,
            description: "Compact and efficient hatchback ideal for urban adventures and weekend getaways.".to_string(),
            features: features(&["GPS Navigation", "Bluetooth", "Backup Camera", "USB Ports"]),
            year: 2022,
            fuel: "Gasoline".to_string(),
            transmission: "Manual".to_string(),
            seats: 5,
            location: "Seattle".to_string(),
        },
        Car {
            id: "6".to_string(),
            brand: "Lamborghini".to_string(),
            model: "Huracán".to_string(),
            category: CarCategory::Sports,
            price_per_day: 850.0,
            image: "https://images.unsplash.com/photo-1544829099-b9a0c5303bea?w=500&h=300&fit=crop&crop=center".to_string(),
            availability: true,
            description: "Exotic supercar delivering unmatched performance and head-turning style.".to_string(),
            features: features(&["Racing Seats", "Premium Sound", "Carbon Fiber Interior", "Track Mode", "Launch Control"]),
            year: 2023,
            fuel: "Gasoline".to_string(),
            transmission: "Automatic".to_string(),
            seats: 2,
            location: "Las Vegas".to_string(),
        },
        Car {
            id: "7".to_string(),
            brand: "Tesla".to_string(),
            model: "Model S".to_string(),
            category: CarCategory::Luxury,
            price_per_day: 180.0,
            image: "https://images.unsplash.com/photo-1560958089-b8a1929cea89?w=500&h=300&fit=crop&crop=center".to_string(),
            availability: true,
            description: "All-electric luxury sedan with cutting-edge technology and exceptional range.".to_string(),
            features: features(&["Autopilot", "Premium Sound", "Glass Roof", "Supercharging", "Over-the-Air Updates"]),
            year: 2023,
            fuel: "Electric".to_string(),
            transmission: "Automatic".to_string(),
            seats: 5,
            location: "San Francisco".to_string(),
        },
        Car {
            id: "8".to_string(),
            brand: "Porsche".to_string(),
            model: "911".to_string(),
            category: CarCategory::Sports,
            price_per_day: 650.0,
            image: "https://images.unsplash.com/photo-1503736334956-4c8f8e92946d?w=500&h=300&fit=crop&crop=center".to_string(),
            availability: true,
            description: "Iconic sports car delivering pure driving pleasure and timeless design.".to_string(),
            features: features(&["Sport Seats", "Sport Chrono Package", "Premium Sound", "Sport Exhaust", "Launch Control"]),
            year: 2023,
            fuel: "Gasoline".to_string(),
            transmission: "Manual".to_string(),
            seats: 2,
            location: "Austin".to_string(),
        },
    ]
}

pub fn bookings() -> Vec<Booking> {
    let fleet = fleet();
    vec![
        Booking {
            id: "b1".to_string(),
            car_id: "1".to_string(),
            car: fleet[0].clone(),
            user_id: "user1".to_string(),
            start_date: "2024-08-25".to_string(),
            end_date: "2024-08-28".to_string(),
            total_cost: 360.0,
            status: BookingStatus::Confirmed,
            user_details: ContactDetails {
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                phone: "+1-555-0123".to_string(),
            },
            created_at: "2024-08-20T10:00:00Z".to_string(),
            payment_ref: None,
        },
        Booking {
            id: "b2".to_string(),
            car_id: "3".to_string(),
            car: fleet[2].clone(),
            user_id: "user1".to_string(),
            start_date: "2024-08-15".to_string(),
            end_date: "2024-08-18".to_string(),
            total_cost: 165.0,
            status: BookingStatus::Completed,
            user_details: ContactDetails {
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                phone: "+1-555-0123".to_string(),
            },
            created_at: "2024-08-10T14:30:00Z".to_string(),
            payment_ref: None,
        },
    ]
}
