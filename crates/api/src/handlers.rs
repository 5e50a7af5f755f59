// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use nearby_traveler_domain::{
    Catalog, Category, DomainError, FlowThresholds, LocationLabel, OnboardingFlow,
    PreferenceSelection, SelectionEntry, TravelPlan, UserType, ValidationResult, evaluate,
    format_travel_date, parse_travel_date, rank_matches, validate_business_name, validate_email,
    validate_hometown, validate_name, validate_selection, validate_username,
};
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedUser, AuthenticationService, SessionData, SessionService};
use crate::directory::{NewUser, UserDirectory, UserProfile};
use crate::drafts::{SignupDraft, SignupDrafts};
use crate::error::{ApiError, translate_domain_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    CatalogResponse, DraftFields, DraftRequest, DraftResponse, EvaluateSelectionRequest,
    EvaluateSelectionResponse, LoginRequest, LoginResponse, MatchesResponse,
    NamedSubsetResponse, RegisterRequest, RegisterResponse, SelectionPayload, TravelPlanResponse,
    UserResponse,
};

fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, ApiError> {
    timestamp.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn parse_flow(flow: Option<&str>) -> Result<Option<OnboardingFlow>, ApiError> {
    flow.map(OnboardingFlow::from_str)
        .transpose()
        .map_err(translate_domain_error)
}

/// Resolves the flow a registration is checked against.
///
/// Only the signup flow of the member's user type is accepted, so a client
/// cannot pick a flow with a lower minimum.
fn signup_flow(user_type: UserType, requested: Option<&str>) -> Result<OnboardingFlow, ApiError> {
    let expected: OnboardingFlow = OnboardingFlow::signup_for(user_type);
    match parse_flow(requested)? {
        None => Ok(expected),
        Some(flow) if flow == expected => Ok(flow),
        Some(flow) => Err(ApiError::InvalidInput {
            field: String::from("flow"),
            message: format!("A {user_type} signup must use the {expected} flow, not {flow}"),
        }),
    }
}

/// Builds a trip from the optional form fields.
///
/// All three fields absent means no trip. Some but not all present is an
/// incomplete trip and is rejected.
fn build_travel_plan(
    destination: Option<&LocationLabel>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Option<TravelPlan>, DomainError> {
    match (destination, start_date, end_date) {
        (None, None, None) => Ok(None),
        (Some(destination), Some(start), Some(end)) => {
            let destination: LocationLabel =
                LocationLabel::new(&destination.city, &destination.state, &destination.country);
            let plan: TravelPlan = TravelPlan::new(
                destination,
                parse_travel_date(start)?,
                parse_travel_date(end)?,
            )?;
            Ok(Some(plan))
        }
        _ => Err(DomainError::MissingTravelPlan),
    }
}

/// Converts a stored member to its API representation.
///
/// # Errors
///
/// Returns `ApiError::Internal` if a date cannot be formatted.
pub fn user_to_response(profile: &UserProfile) -> Result<UserResponse, ApiError> {
    let travel_plan: Option<TravelPlanResponse> = profile
        .travel_plan
        .as_ref()
        .map(|plan| -> Result<TravelPlanResponse, ApiError> {
            Ok(TravelPlanResponse {
                destination: plan.destination().clone(),
                destination_label: plan.destination().label(),
                start_date: format_travel_date(plan.start_date()).map_err(translate_domain_error)?,
                end_date: format_travel_date(plan.end_date()).map_err(translate_domain_error)?,
                nights: plan.nights(),
            })
        })
        .transpose()?;

    Ok(UserResponse {
        user_id: profile.user_id,
        username: profile.username.clone(),
        email: profile.email.clone(),
        name: profile.name.clone(),
        user_type: profile.user_type.to_string(),
        hometown: profile.hometown.clone(),
        hometown_label: profile.hometown.label(),
        travel_plan,
        business_name: profile.business_name.clone(),
        bio: profile.bio.clone(),
        selection: SelectionPayload::from(&profile.selection),
        created_at: format_timestamp(profile.created_at)?,
    })
}

/// Registers a new member.
///
/// Account fields, the password, the type-specific profile fields, and the
/// selection requirement of the flow are checked in that order; the first
/// failure is returned. The flow defaults to the signup flow of the
/// member's user type.
///
/// # Arguments
///
/// * `directory` - The member directory
/// * `sessions` - When given, a session is opened and its token returned
/// * `thresholds` - Per-flow selection minimums
/// * `request` - The registration request
///
/// # Errors
///
/// Returns an error if any check fails or the username or email is taken.
pub fn register_user(
    directory: &mut UserDirectory,
    sessions: Option<&mut SessionService>,
    thresholds: &FlowThresholds,
    request: &RegisterRequest,
) -> Result<RegisterResponse, ApiError> {
    let username: &str = request.username.trim();
    let email: &str = request.email.trim();

    validate_username(username)?;
    validate_email(email)?;
    validate_name(&request.name)?;

    let user_type: UserType = UserType::from_str(&request.user_type)?;

    let hometown: LocationLabel = LocationLabel::new(
        &request.hometown.city,
        &request.hometown.state,
        &request.hometown.country,
    );
    validate_hometown(&hometown)?;

    let confirmation: &str = request
        .confirm_password
        .as_deref()
        .unwrap_or(&request.password);
    PasswordPolicy::default().validate(&request.password, confirmation, username, email)?;

    let travel_plan: Option<TravelPlan> = build_travel_plan(
        request.destination.as_ref(),
        request.travel_start_date.as_deref(),
        request.travel_end_date.as_deref(),
    )?;

    let business_name: Option<String> = request
        .business_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    match user_type {
        UserType::Traveler if travel_plan.is_none() => {
            return Err(translate_domain_error(DomainError::MissingTravelPlan));
        }
        UserType::Business => validate_business_name(business_name.as_deref())?,
        UserType::Local | UserType::Traveler => {}
    }

    let flow: OnboardingFlow = signup_flow(user_type, request.flow.as_deref())?;
    let selection: PreferenceSelection = request.selection.to_selection();
    if let Err(err) = validate_selection(&selection, thresholds, flow) {
        warn!(username, %flow, total = selection.total(), "Registration rejected: selection too small");
        return Err(translate_domain_error(err));
    }

    let new_user: NewUser = NewUser {
        username: username.to_string(),
        email: email.to_string(),
        name: request.name.trim().to_string(),
        user_type,
        hometown,
        travel_plan,
        business_name,
        bio: request
            .bio
            .as_deref()
            .map(str::trim)
            .filter(|bio| !bio.is_empty())
            .map(str::to_string),
        selection,
    };

    let profile: UserProfile = directory.insert(new_user, &request.password)?;
    let token: Option<String> = sessions.map(|sessions| sessions.create(profile.user_id).0);

    info!(
        user_id = profile.user_id,
        username = %profile.username,
        user_type = %profile.user_type,
        %flow,
        "Registered user"
    );

    Ok(RegisterResponse {
        user: user_to_response(&profile)?,
        token,
        message: format!("Welcome to Nearby Traveler, {}!", profile.name),
    })
}

/// Logs a member in.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the credentials are wrong.
pub fn login(
    directory: &UserDirectory,
    sessions: &mut SessionService,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (token, session, profile): (String, SessionData, &UserProfile) =
        AuthenticationService::login(directory, sessions, request.username.trim(), &request.password)
            .inspect_err(|e| warn!(username = %request.username, error = %e, "Login failed"))?;

    info!(user_id = profile.user_id, username = %profile.username, "User logged in");

    Ok(LoginResponse {
        token,
        expires_at: format_timestamp(session.expires_at)?,
        user: user_to_response(profile)?,
    })
}

/// Ends a session. Returns whether the token was live.
pub fn logout(sessions: &mut SessionService, token: &str) -> bool {
    let revoked: bool = sessions.revoke(token);
    debug!(revoked, "Logout");
    revoked
}

/// Returns the authenticated member.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the member no longer exists.
pub fn current_user(
    directory: &UserDirectory,
    user: &AuthenticatedUser,
) -> Result<UserResponse, ApiError> {
    let profile: &UserProfile =
        directory
            .find_by_id(user.user_id)
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("User"),
                message: format!("User '{}' does not exist", user.username),
            })?;
    user_to_response(profile)
}

/// Evaluates a selection for a flow or an explicit minimum.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the flow is unknown or neither a flow
/// nor a minimum was given.
pub fn evaluate_selection(
    thresholds: &FlowThresholds,
    request: &EvaluateSelectionRequest,
) -> Result<EvaluateSelectionResponse, ApiError> {
    let flow: Option<OnboardingFlow> = parse_flow(request.flow.as_deref())?;
    let minimum: usize = match (request.minimum, flow) {
        (Some(minimum), _) => minimum,
        (None, Some(flow)) => thresholds.requirement_for(flow).minimum(),
        (None, None) => {
            return Err(ApiError::InvalidInput {
                field: String::from("minimum"),
                message: String::from("Either a flow or a minimum is required"),
            });
        }
    };

    let selection: PreferenceSelection = request.selection.to_selection();
    let result: ValidationResult = evaluate(&selection, minimum);

    let custom = |category: Category| -> Vec<String> {
        selection
            .get(category)
            .iter()
            .filter(|entry| entry.is_custom())
            .map(|entry| entry.text().to_string())
            .collect()
    };

    Ok(EvaluateSelectionResponse {
        flow: flow.map(|flow| flow.to_string()),
        minimum,
        total: result.total,
        is_valid: result.is_valid,
        needed: result.needed,
        message: result.shortfall_message(),
        custom_entries: SelectionPayload {
            interests: custom(Category::Interests),
            activities: custom(Category::Activities),
            events: custom(Category::Events),
            languages: custom(Category::Languages),
        },
    })
}

/// Describes the controlled vocabulary and the effective thresholds.
#[must_use]
pub fn get_catalog(thresholds: &FlowThresholds) -> CatalogResponse {
    let list = |category: Category| -> Vec<String> {
        Catalog::list(category)
            .into_iter()
            .map(str::to_string)
            .collect()
    };

    let subsets: Vec<NamedSubsetResponse> =
        [Catalog::top_choices().name, "All Activities", "All Events", "All Languages"]
            .into_iter()
            .filter_map(Catalog::named_subset)
            .map(|subset| NamedSubsetResponse {
                name: subset.name.to_string(),
                category: subset.category.to_string(),
                items: subset.entries().into_iter().map(SelectionEntry::into_text).collect(),
            })
            .collect();

    CatalogResponse {
        lists: SelectionPayload {
            interests: list(Category::Interests),
            activities: list(Category::Activities),
            events: list(Category::Events),
            languages: list(Category::Languages),
        },
        subsets,
        thresholds: thresholds
            .iter()
            .map(|(flow, requirement)| (flow.to_string(), requirement.minimum()))
            .collect(),
    }
}

/// Ranks other members by what they share with the authenticated member.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the member no longer exists.
pub fn find_matches(
    directory: &UserDirectory,
    user: &AuthenticatedUser,
) -> Result<MatchesResponse, ApiError> {
    let me: &UserProfile =
        directory
            .find_by_id(user.user_id)
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("User"),
                message: format!("User '{}' does not exist", user.username),
            })?;

    let others: Vec<_> = directory.profiles().map(UserProfile::match_profile).collect();
    let matches = rank_matches(&me.match_profile(), &others);
    debug!(username = %me.username, count = matches.len(), "Ranked matches");

    Ok(MatchesResponse {
        username: me.username.clone(),
        matches,
    })
}

/// Checks the fields a draft step may carry.
fn validate_draft_fields(fields: &DraftFields) -> Result<(), ApiError> {
    if let Some(user_type) = &fields.user_type {
        UserType::from_str(user_type)?;
    }
    if let Some(username) = &fields.username {
        validate_username(username.trim())?;
    }
    if let Some(email) = &fields.email {
        validate_email(email.trim())?;
    }
    Ok(())
}

fn draft_to_response(draft: SignupDraft) -> Result<DraftResponse, ApiError> {
    Ok(DraftResponse {
        updated_at: format_timestamp(draft.updated_at)?,
        expires_at: format_timestamp(draft.expires_at)?,
        draft_id: draft.draft_id,
        step: draft.step,
        fields: draft.fields,
    })
}

fn draft_not_found(draft_id: &str) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Signup draft"),
        message: format!("Draft '{draft_id}' does not exist or has expired"),
    }
}

/// Opens a signup draft.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if a provided field is malformed.
pub fn create_draft(
    drafts: &mut SignupDrafts,
    request: DraftRequest,
    now: OffsetDateTime,
) -> Result<DraftResponse, ApiError> {
    validate_draft_fields(&request.fields)?;
    let draft: SignupDraft = drafts.create(request.step.unwrap_or(1), request.fields, now);
    draft_to_response(draft)
}

/// Reads a signup draft.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the draft is missing or expired.
pub fn get_draft(
    drafts: &mut SignupDrafts,
    draft_id: &str,
    now: OffsetDateTime,
) -> Result<DraftResponse, ApiError> {
    let draft: SignupDraft = drafts
        .read(draft_id, now)
        .ok_or_else(|| draft_not_found(draft_id))?;
    draft_to_response(draft)
}

/// Merges a step into a signup draft.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if a provided field is malformed, or
/// `ApiError::ResourceNotFound` if the draft is missing or expired.
pub fn update_draft(
    drafts: &mut SignupDrafts,
    draft_id: &str,
    request: DraftRequest,
    now: OffsetDateTime,
) -> Result<DraftResponse, ApiError> {
    validate_draft_fields(&request.fields)?;
    let draft: SignupDraft = drafts
        .update(draft_id, request.step, request.fields, now)
        .ok_or_else(|| draft_not_found(draft_id))?;
    draft_to_response(draft)
}

/// Discards a signup draft.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no draft has this id.
pub fn clear_draft(drafts: &mut SignupDrafts, draft_id: &str) -> Result<(), ApiError> {
    if drafts.clear(draft_id) {
        Ok(())
    } else {
        Err(draft_not_found(draft_id))
    }
}
