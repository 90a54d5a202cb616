//! The booking backend's REST operations.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use sporta_core::models::{
    ActiveUsers, Booking, BookingRequest, CatalogConfig, ContactMessage, PasswordReset,
    PasswordResetRequest, Profile, ProfileUpdate, Registration, StatusUpdate, SystemStats,
    UsageStat, User, UserForm, Venue, VenueForm,
};
use sporta_core::{AccessToken, ApiUrl, Credentials, Error, RefreshToken, Result, SessionContext};

use crate::client::RestClient;
use crate::endpoints::{self, *};
use crate::sources::{self, Collection, Screen};

/// Tokens and identity obtained by a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub session: SessionContext,
    pub refresh_token: RefreshToken,
    pub profile: Profile,
}

/// Client for the booking backend, bound to one session snapshot.
#[derive(Debug, Clone)]
pub struct SportaBackend {
    client: RestClient,
    session: Arc<SessionContext>,
}

impl SportaBackend {
    /// Create a backend client for an anonymous visitor.
    pub fn new(api: ApiUrl) -> Result<Self> {
        Ok(Self {
            client: RestClient::new(api)?,
            session: SessionContext::anonymous().shared(),
        })
    }

    /// Returns a client acting for `session`.
    pub fn with_session(&self, session: Arc<SessionContext>) -> Self {
        Self {
            client: self.client.clone(),
            session,
        }
    }

    pub fn api(&self) -> &ApiUrl {
        self.client.api()
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    fn token(&self) -> Result<&AccessToken> {
        self.session
            .access_token()
            .ok_or_else(|| Error::validation("session", "Please log in first."))
    }

    // ========================================================================
    // Auth and profile
    // ========================================================================

    /// Log in and look up the account's role.
    #[instrument(skip(self, credentials), fields(username = credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutput> {
        credentials.validate()?;

        let request = LoginRequest {
            username: credentials.username(),
            password: credentials.password(),
        };
        let tokens: TokenPairResponse = self
            .client
            .post(LOGIN, &request, None)
            .await?
            .entity("tokens")?;

        let access_token = AccessToken::new(tokens.access);
        let profile = self.fetch_profile(&access_token).await?;
        info!(role = %profile.role, "logged in");

        let username = if profile.username.is_empty() {
            credentials.username().to_string()
        } else {
            profile.username.clone()
        };

        Ok(LoginOutput {
            session: SessionContext::authenticated(profile.role, username, access_token),
            refresh_token: RefreshToken::new(tokens.refresh),
            profile,
        })
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// Returns the rotated refresh token when the backend issues one.
    #[instrument(skip_all)]
    pub async fn refresh(
        &self,
        refresh_token: &RefreshToken,
    ) -> Result<(AccessToken, Option<RefreshToken>)> {
        let request = RefreshRequest {
            refresh: refresh_token.as_str(),
        };
        let response: RefreshResponse = self
            .client
            .post(TOKEN_REFRESH, &request, None)
            .await?
            .entity("tokens")?;

        Ok((
            AccessToken::new(response.access),
            response.refresh.map(RefreshToken::new),
        ))
    }

    /// Create an account.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: Registration) -> Result<()> {
        let registration = registration.validated()?;
        self.client
            .post(REGISTER, &registration, None)
            .await?
            .into_success()?;
        Ok(())
    }

    /// Ask for a password reset code to be emailed.
    ///
    /// Returns the backend's confirmation message.
    #[instrument(skip_all)]
    pub async fn forgot_password(&self, request: PasswordResetRequest) -> Result<String> {
        let request = request.validated()?;
        let envelope = self
            .client
            .post(FORGOT_PASSWORD, &request, None)
            .await?
            .into_success()?;
        Ok(envelope.message().unwrap_or_default().to_string())
    }

    /// Set a new password using the emailed code.
    #[instrument(skip_all)]
    pub async fn reset_password(&self, reset: PasswordReset) -> Result<()> {
        let reset = reset.validated()?;
        self.client
            .post(VERIFY_CODE, &reset, None)
            .await?
            .into_success()?;
        info!("password reset");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<Profile> {
        let token = self.token()?;
        self.fetch_profile(token).await
    }

    async fn fetch_profile(&self, token: &AccessToken) -> Result<Profile> {
        self.client.get(PROFILE, &[], Some(token)).await?.entity("user")
    }

    #[instrument(skip(self))]
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<Profile> {
        let update = update.validated()?;
        let token = self.token()?;
        self.client
            .patch(PROFILE, &update, Some(token))
            .await?
            .entity("user")
    }

    // ========================================================================
    // Venues
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn venue(&self, id: u64) -> Result<Venue> {
        self.client
            .get(&endpoints::hall(id), &[], self.session.access_token())
            .await?
            .entity("hall")
    }

    /// Cities and sports for the venue form dropdowns.
    #[instrument(skip(self))]
    pub async fn catalog_config(&self) -> Result<CatalogConfig> {
        self.client
            .get(HALL_CONFIG, &[], self.session.access_token())
            .await?
            .entity("config")
    }

    /// Facility names that can be attached to a venue.
    #[instrument(skip(self))]
    pub async fn facilities(&self) -> Result<Vec<String>> {
        let envelope = self
            .client
            .get(HALL_FACILITIES, &[], self.session.access_token())
            .await?
            .into_success()?;
        let list = match envelope.data.get("facilities").filter(|v| v.is_array()) {
            Some(nested) => nested.clone(),
            None => envelope.data.clone(),
        };
        let entries: Vec<FacilityEntry> = serde_json::from_value(list).map_err(Error::decode)?;
        Ok(entries.into_iter().map(FacilityEntry::into_name).collect())
    }

    #[instrument(skip(self, form, catalog), fields(name = %form.name))]
    pub async fn create_venue(&self, form: VenueForm, catalog: &CatalogConfig) -> Result<Venue> {
        let form = form.validated(&catalog.cities, &catalog.sports)?;
        let token = self.token()?;
        self.client
            .post(HALL_CREATE, &form, Some(token))
            .await?
            .entity("hall")
    }

    #[instrument(skip(self, form, catalog))]
    pub async fn update_venue(
        &self,
        id: u64,
        form: VenueForm,
        catalog: &CatalogConfig,
    ) -> Result<Venue> {
        let form = form.validated(&catalog.cities, &catalog.sports)?;
        let token = self.token()?;
        self.client
            .patch(&endpoints::hall_update(id), &form, Some(token))
            .await?
            .entity("hall")
    }

    #[instrument(skip(self))]
    pub async fn update_facilities(&self, id: u64, facilities: &[String]) -> Result<()> {
        let token = self.token()?;
        let request = FacilitiesRequest { facilities };
        self.client
            .patch(&endpoints::hall_update_facilities(id), &request, Some(token))
            .await?
            .into_success()?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_venue(&self, id: u64) -> Result<()> {
        let token = self.token()?;
        self.client
            .delete(&endpoints::hall_delete(id), Some(token))
            .await?
            .into_success()?;
        debug!(id, "venue deleted");
        Ok(())
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn create_booking(&self, request: &BookingRequest) -> Result<CreatedBooking> {
        let token = self.token()?;
        self.client
            .post(BOOKING_CREATE, request, Some(token))
            .await?
            .entity("booking")
    }

    /// Confirm or cancel a booking from the admin table.
    #[instrument(skip(self))]
    pub async fn update_booking_status(&self, id: u64, update: &StatusUpdate) -> Result<()> {
        let token = self.token()?;
        self.client
            .patch(&endpoints::booking_status(id), update, Some(token))
            .await?
            .into_success()?;
        Ok(())
    }

    // ========================================================================
    // Users
    // ========================================================================

    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn create_user(&self, form: UserForm) -> Result<User> {
        let form = form.validated()?;
        let token = self.token()?;
        self.client
            .post(USER_CREATE, &form, Some(token))
            .await?
            .entity("user")
    }

    #[instrument(skip(self, form))]
    pub async fn update_user(&self, id: u64, form: UserForm) -> Result<User> {
        let form = form.validated()?;
        let token = self.token()?;
        self.client
            .patch(&endpoints::user_update(id), &form, Some(token))
            .await?
            .entity("user")
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: u64) -> Result<()> {
        let token = self.token()?;
        self.client
            .delete(&endpoints::user_delete(id), Some(token))
            .await?
            .into_success()?;
        Ok(())
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn system_stats(&self) -> Result<SystemStats> {
        let token = self.token()?;
        self.client
            .get(SYSTEM_STATS, &[], Some(token))
            .await?
            .entity("stats")
    }

    /// Number of active accounts.
    #[instrument(skip(self))]
    pub async fn active_users(&self) -> Result<ActiveUsers> {
        let token = self.token()?;
        self.client
            .get(ACTIVE_USERS, &[], Some(token))
            .await?
            .entity("report")
    }

    // ========================================================================
    // Support
    // ========================================================================

    /// Send a message to the support team.
    #[instrument(skip(self, message), fields(subject = %message.subject))]
    pub async fn contact_support(&self, message: ContactMessage) -> Result<()> {
        let message = message.validated()?;
        let token = self.token()?;
        self.client
            .post(CONTACT, &message, Some(token))
            .await?
            .into_success()?;
        Ok(())
    }

    // ========================================================================
    // List sources
    // ========================================================================

    fn collection<T>(&self, screen: Screen) -> Collection<T> {
        Collection::new(
            self.client.clone(),
            screen,
            self.session.access_token().cloned(),
        )
    }

    /// Public venue list driving the carousel.
    pub fn venue_carousel(&self) -> Collection<Venue> {
        self.collection(sources::VENUE_CAROUSEL)
    }

    pub fn admin_venues(&self) -> Collection<Venue> {
        self.collection(sources::ADMIN_VENUES)
    }

    pub fn admin_bookings(&self) -> Collection<Booking> {
        self.collection(sources::ADMIN_BOOKINGS)
    }

    pub fn admin_users(&self) -> Collection<User> {
        self.collection(sources::ADMIN_USERS)
    }

    pub fn usage_stats(&self) -> Collection<UsageStat> {
        self.collection(sources::USAGE_STATS)
    }

    /// The signed-in user's booking history.
    pub fn my_bookings(&self) -> Collection<Booking> {
        self.collection(sources::MY_BOOKINGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_backend_has_no_token() {
        let backend = SportaBackend::new(ApiUrl::new("http://127.0.0.1:8000").unwrap()).unwrap();
        assert!(!backend.session().is_authenticated());
        assert!(backend.token().is_err());
    }

    #[test]
    fn collections_inherit_the_session() {
        let backend = SportaBackend::new(ApiUrl::new("http://127.0.0.1:8000").unwrap()).unwrap();
        let session = SessionContext::authenticated(
            sporta_core::Role::SysAdmin,
            "root",
            AccessToken::new("tok"),
        )
        .shared();
        let backend = backend.with_session(session);
        assert_eq!(backend.admin_users().screen(), sources::ADMIN_USERS);
        assert!(format!("{:?}", backend.admin_users()).contains("authed: true"));
    }
}
