//! Fixed request topology of the generated project's API.
//!
//! Routes mirror the generated URL conf: Djoser user endpoints and SimpleJWT
//! token endpoints under `/api/auth/`, the read-only user viewset under
//! `/api/users/`, and the plain SimpleJWT views under `/api/token/`.

use crate::collection::placeholder::CollectionVariable;
use crate::collection::types::{
    Body, Collection, Event, Folder, Header, Info, Method, Request, RequestItem, RequestUrl,
    SCHEMA_URL, Variable,
};
use crate::context::ScaffoldContext;

/// Stores `access` and `refresh` from a token-pair response.
const STORE_TOKEN_PAIR: &[&str] = &[
    "if (pm.response.code === 200) {",
    "    var jsonData = pm.response.json();",
    "    pm.collectionVariables.set(\"access_token\", jsonData.access);",
    "    pm.collectionVariables.set(\"refresh_token\", jsonData.refresh);",
    "}",
];

/// Refresh tokens rotate, so the new refresh token is kept when present.
const STORE_REFRESHED: &[&str] = &[
    "if (pm.response.code === 200) {",
    "    var jsonData = pm.response.json();",
    "    pm.collectionVariables.set(\"access_token\", jsonData.access);",
    "    if (jsonData.refresh) {",
    "        pm.collectionVariables.set(\"refresh_token\", jsonData.refresh);",
    "    }",
    "}",
];

const CREDENTIALS_BODY: &str = "{\n    \"email\": \"user@example.com\",\n    \"password\": \"SecurePassword123!\"\n}";

pub struct CollectionBuilder;

impl CollectionBuilder {
    /// Build the full collection. Only the `info` block depends on `ctx`.
    pub fn build(ctx: &ScaffoldContext, base_url: &str) -> Collection {
        Collection {
            info: Info {
                postman_id: ctx.collection_id(),
                name: ctx.collection_name(),
                description: ctx.collection_description(),
                schema: SCHEMA_URL.to_string(),
            },
            variable: CollectionVariable::ALL
                .iter()
                .map(|var| Variable::string(*var, var.initial_value(base_url)))
                .collect(),
            item: vec![
                Self::authentication(),
                Self::users(),
                Self::alternative_tokens(),
            ],
        }
    }

    fn authentication() -> Folder {
        Folder {
            name: "Authentication".to_string(),
            description: "Registration, JWT token lifecycle and current-user management."
                .to_string(),
            item: vec![
                RequestItem {
                    name: "Create Account".to_string(),
                    event: Vec::new(),
                    request: Request {
                        method: Method::Post,
                        header: vec![Header::json_content_type()],
                        body: Some(Body::raw(
                            "{\n    \"email\": \"user@example.com\",\n    \"password\": \"SecurePassword123!\",\n    \"re_password\": \"SecurePassword123!\",\n    \"first_name\": \"John\",\n    \"last_name\": \"Doe\"\n}",
                        )),
                        url: RequestUrl::from_base("/api/auth/users/"),
                    },
                    description: Some(
                        "Register a new user. Accounts created through the API are never staff or superuser."
                            .to_string(),
                    ),
                    response: Vec::new(),
                },
                RequestItem {
                    name: "Obtain Token Pair".to_string(),
                    event: vec![Event::test_script(STORE_TOKEN_PAIR)],
                    request: Request {
                        method: Method::Post,
                        header: vec![Header::json_content_type()],
                        body: Some(Body::raw(CREDENTIALS_BODY)),
                        url: RequestUrl::from_base("/api/auth/jwt/create/"),
                    },
                    description: Some(
                        "Log in with email and password. Stores the access and refresh tokens in collection variables. Repeated failures lock the account temporarily."
                            .to_string(),
                    ),
                    response: Vec::new(),
                },
                RequestItem {
                    name: "Refresh Access Token".to_string(),
                    event: vec![Event::test_script(STORE_REFRESHED)],
                    request: Request {
                        method: Method::Post,
                        header: vec![Header::json_content_type()],
                        body: Some(Body::raw(format!(
                            "{{\n    \"refresh\": \"{}\"\n}}",
                            CollectionVariable::RefreshToken.placeholder()
                        ))),
                        url: RequestUrl::from_base("/api/auth/jwt/refresh/"),
                    },
                    description: Some(
                        "Exchange the refresh token for a new access token. Refresh tokens are rotated."
                            .to_string(),
                    ),
                    response: Vec::new(),
                },
                RequestItem {
                    name: "Get Current User".to_string(),
                    event: Vec::new(),
                    request: Request {
                        method: Method::Get,
                        header: vec![Header::bearer(CollectionVariable::AccessToken)],
                        body: None,
                        url: RequestUrl::from_base("/api/auth/users/me/"),
                    },
                    description: Some("Profile of the authenticated user.".to_string()),
                    response: Vec::new(),
                },
                RequestItem {
                    name: "Update Current User".to_string(),
                    event: Vec::new(),
                    request: Request {
                        method: Method::Patch,
                        header: vec![
                            Header::json_content_type(),
                            Header::bearer(CollectionVariable::AccessToken),
                        ],
                        body: Some(Body::raw(
                            "{\n    \"first_name\": \"Jane\",\n    \"last_name\": \"Smith\"\n}",
                        )),
                        url: RequestUrl::from_base("/api/auth/users/me/"),
                    },
                    description: Some(
                        "Partially update the authenticated user's profile. Staff and superuser flags are ignored."
                            .to_string(),
                    ),
                    response: Vec::new(),
                },
                RequestItem {
                    name: "Change Password".to_string(),
                    event: Vec::new(),
                    request: Request {
                        method: Method::Post,
                        header: vec![
                            Header::json_content_type(),
                            Header::bearer(CollectionVariable::AccessToken),
                        ],
                        body: Some(Body::raw(
                            "{\n    \"current_password\": \"SecurePassword123!\",\n    \"new_password\": \"NewSecurePassword456!\",\n    \"re_new_password\": \"NewSecurePassword456!\"\n}",
                        )),
                        url: RequestUrl::from_base("/api/auth/users/set_password/"),
                    },
                    description: Some("Change the authenticated user's password.".to_string()),
                    response: Vec::new(),
                },
            ],
        }
    }

    fn users() -> Folder {
        Folder {
            name: "Users".to_string(),
            description: "Read-only user endpoints. All requests require a valid access token."
                .to_string(),
            item: vec![
                RequestItem {
                    name: "List Users".to_string(),
                    event: Vec::new(),
                    request: Request {
                        method: Method::Get,
                        header: vec![Header::bearer(CollectionVariable::AccessToken)],
                        body: None,
                        url: RequestUrl::from_base("/api/users/").with_query("page", "1"),
                    },
                    description: Some("Paginated list of users (20 per page).".to_string()),
                    response: Vec::new(),
                },
                RequestItem {
                    name: "Get User by ID".to_string(),
                    event: Vec::new(),
                    request: Request {
                        method: Method::Get,
                        header: vec![Header::bearer(CollectionVariable::AccessToken)],
                        body: None,
                        url: RequestUrl::from_base("/api/users/1/"),
                    },
                    description: Some("Fetch a single user by numeric id.".to_string()),
                    response: Vec::new(),
                },
                RequestItem {
                    name: "Get Current User (Users Endpoint)".to_string(),
                    event: Vec::new(),
                    request: Request {
                        method: Method::Get,
                        header: vec![Header::bearer(CollectionVariable::AccessToken)],
                        body: None,
                        url: RequestUrl::from_base("/api/users/me/"),
                    },
                    description: Some(
                        "Current user through the users viewset `me` action.".to_string(),
                    ),
                    response: Vec::new(),
                },
            ],
        }
    }

    fn alternative_tokens() -> Folder {
        Folder {
            name: "Alternative Token Endpoints".to_string(),
            description: "Plain SimpleJWT views, equivalent to the Djoser JWT endpoints."
                .to_string(),
            item: vec![
                RequestItem {
                    name: "Obtain Token Pair (Alt)".to_string(),
                    event: vec![Event::test_script(STORE_TOKEN_PAIR)],
                    request: Request {
                        method: Method::Post,
                        header: vec![Header::json_content_type()],
                        body: Some(Body::raw(CREDENTIALS_BODY)),
                        url: RequestUrl::from_base("/api/token/"),
                    },
                    description: Some(
                        "Obtain an access/refresh token pair via the secondary endpoint."
                            .to_string(),
                    ),
                    response: Vec::new(),
                },
                RequestItem {
                    name: "Refresh Access Token (Alt)".to_string(),
                    event: vec![Event::test_script(STORE_REFRESHED)],
                    request: Request {
                        method: Method::Post,
                        header: vec![Header::json_content_type()],
                        body: Some(Body::raw(format!(
                            "{{\n    \"refresh\": \"{}\"\n}}",
                            CollectionVariable::RefreshToken.placeholder()
                        ))),
                        url: RequestUrl::from_base("/api/token/refresh/"),
                    },
                    description: Some(
                        "Refresh the access token via the secondary endpoint.".to_string(),
                    ),
                    response: Vec::new(),
                },
            ],
        }
    }
}
