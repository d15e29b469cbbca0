//! Human-friendly rendering of the working set.

use chrono::Local;
use peoplecast_core::{User, Weather};

pub fn print_users(users: &[User]) {
    println!(
        "{} users fetched at {}",
        users.len(),
        Local::now().format("%Y-%m-%d %H:%M")
    );

    for user in users {
        print_user(user);
    }
}

fn print_user(user: &User) {
    println!();
    println!("#{} {} <{}>", user.id, user.name, user.email);
    println!("    {}, {}", user.location.city, user.location.country);
    match &user.weather {
        Some(weather) => println!("    {}", format_weather(weather)),
        None => println!("    weather unavailable"),
    }
}

fn format_weather(weather: &Weather) -> String {
    format!(
        "{}, {:.1}°C now ({:.1}°C to {:.1}°C today)",
        weather.condition.description,
        weather.current_temperature,
        weather.min_temperature,
        weather.max_temperature,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_line_shows_condition_and_temperature_range() {
        let weather = Weather::from_readings(61, 12.5, &[10.0, 15.5, 9.25]).unwrap();

        assert_eq!(format_weather(&weather), "Rain, 12.5°C now (9.2°C to 15.5°C today)");
    }
}
