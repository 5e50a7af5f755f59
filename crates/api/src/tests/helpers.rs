// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use nearby_traveler_domain::{FlowThresholds, LocationLabel};

use crate::{RegisterRequest, RegisterResponse, SelectionPayload, UserDirectory, register_user};

pub const TEST_PASSWORD: &str = "Sunset#Lisbon9";

/// A directory hashing at the cheapest bcrypt cost.
pub fn create_test_directory() -> UserDirectory {
    UserDirectory::new(4)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

/// Ten items: enough for every default flow.
pub fn create_full_selection() -> SelectionPayload {
    SelectionPayload {
        interests: strings(&["Coffee Culture", "Museums", "Hiking", "Rock Climbing"]),
        activities: strings(&["Walking Tours", "Food Tours", "Kayaking"]),
        events: strings(&["Concerts", "Food Festivals"]),
        languages: strings(&["English"]),
    }
}

pub fn create_local_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: TEST_PASSWORD.to_string(),
        confirm_password: Some(TEST_PASSWORD.to_string()),
        name: String::from("Test Local"),
        user_type: String::from("local"),
        hometown: LocationLabel::new("Austin", "Texas", "United States"),
        selection: create_full_selection(),
        ..RegisterRequest::default()
    }
}

pub fn create_traveler_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        user_type: String::from("traveler"),
        name: String::from("Test Traveler"),
        destination: Some(LocationLabel::new("Lisbon", "", "Portugal")),
        travel_start_date: Some(String::from("2026-06-01")),
        travel_end_date: Some(String::from("2026-06-10")),
        ..create_local_request(username)
    }
}

pub fn create_business_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        user_type: String::from("business"),
        name: String::from("Test Owner"),
        business_name: Some(String::from("Cafe Lua")),
        selection: SelectionPayload {
            interests: strings(&["Coffee Culture", "Live Music", "Craft Beer"]),
            ..SelectionPayload::default()
        },
        ..create_local_request(username)
    }
}

/// Registers a member without issuing a token.
pub fn register(directory: &mut UserDirectory, request: &RegisterRequest) -> RegisterResponse {
    register_user(directory, None, &FlowThresholds::default(), request).unwrap()
}
