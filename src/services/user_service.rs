// ==================== USER DIRECTORY ====================
// Users are keyed by phone number and created on first registration.

use validator::Validate;

use crate::{
    database::Store,
    models::{Address, GetAddressRequest, RegisterUserRequest, UpdateAddressRequest, User},
    utils::{now_millis, AppError},
};

pub struct Registration {
    pub user: User,
    /// `false` when the phone number was already registered
    pub created: bool,
}

/// POST /api/users - find-or-create by phone number
pub async fn register_user(store: &dyn Store, request: RegisterUserRequest) -> Result<Registration, AppError> {
    request.validate()?;

    if let Some(user) = store.find_user(&request.phone_number).await? {
        return Ok(Registration { user, created: false });
    }

    let candidate = User::new(request.phone_number.clone(), request.name, now_millis());
    match store.insert_user(candidate).await? {
        Some(user) => {
            log::info!("👤 Registered user {}", user.phone_number);
            Ok(Registration { user, created: true })
        }
        None => {
            // Lost a race with a concurrent registration of the same phone
            let user = store
                .find_user(&request.phone_number)
                .await?
                .ok_or_else(|| AppError::internal("User vanished after duplicate key"))?;
            Ok(Registration { user, created: false })
        }
    }
}

/// POST /api/users/updateAddress - append, or replace at `index`
pub async fn update_address(store: &dyn Store, request: UpdateAddressRequest) -> Result<Vec<Address>, AppError> {
    request.validate()?;

    let phone = request.phone_number.as_str();
    let updated = match request.index {
        None => store.push_user_address(phone, &request.address).await?,
        Some(index) => {
            let user = store
                .find_user(phone)
                .await?
                .ok_or_else(|| AppError::not_found("User not found"))?;
            if index >= user.addresses.len() {
                return Err(AppError::validation(format!(
                    "Address index {} out of range ({} saved)",
                    index,
                    user.addresses.len()
                )));
            }
            store.set_user_address(phone, index, &request.address).await?
        }
    };

    let user = updated.ok_or_else(|| AppError::not_found("User not found"))?;
    log::info!("🏠 Addresses updated for {} ({} saved)", user.phone_number, user.addresses.len());
    Ok(user.addresses)
}

/// POST /api/users/getAddress
pub async fn get_addresses(store: &dyn Store, request: GetAddressRequest) -> Result<Vec<Address>, AppError> {
    request.validate()?;

    let user = store
        .find_user(&request.phone_number)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(user.addresses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::InMemoryStore;
    use crate::models::sample_address;

    const PHONE: &str = "9876543210";

    fn register(name: Option<&str>) -> RegisterUserRequest {
        RegisterUserRequest {
            phone_number: PHONE.to_string(),
            name: name.map(str::to_string),
        }
    }

    #[actix_rt::test]
    async fn test_register_is_find_or_create() {
        let store = InMemoryStore::new();

        let first = register_user(&store, register(Some("Kiran"))).await.unwrap();
        assert!(first.created);

        let second = register_user(&store, register(None)).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.user.id, first.user.id);
        assert_eq!(second.user.name.as_deref(), Some("Kiran"));
    }

    #[actix_rt::test]
    async fn test_append_then_replace_address() {
        let store = InMemoryStore::new();
        register_user(&store, register(None)).await.unwrap();

        let addresses = update_address(
            &store,
            UpdateAddressRequest { phone_number: PHONE.to_string(), address: sample_address(), index: None },
        )
        .await
        .unwrap();
        assert_eq!(addresses.len(), 1);

        let mut moved = sample_address();
        moved.city = "Mysuru".to_string();
        let addresses = update_address(
            &store,
            UpdateAddressRequest { phone_number: PHONE.to_string(), address: moved, index: Some(0) },
        )
        .await
        .unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].city, "Mysuru");

        let fetched = get_addresses(&store, GetAddressRequest { phone_number: PHONE.to_string() })
            .await
            .unwrap();
        assert_eq!(fetched, addresses);
    }

    #[actix_rt::test]
    async fn test_replace_out_of_range_is_rejected() {
        let store = InMemoryStore::new();
        register_user(&store, register(None)).await.unwrap();

        let result = update_address(
            &store,
            UpdateAddressRequest { phone_number: PHONE.to_string(), address: sample_address(), index: Some(3) },
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[actix_rt::test]
    async fn test_unknown_user() {
        let store = InMemoryStore::new();

        let update = update_address(
            &store,
            UpdateAddressRequest { phone_number: PHONE.to_string(), address: sample_address(), index: None },
        )
        .await;
        assert!(matches!(update, Err(AppError::NotFound(_))));

        let get = get_addresses(&store, GetAddressRequest { phone_number: PHONE.to_string() }).await;
        assert!(matches!(get, Err(AppError::NotFound(_))));
    }
}
