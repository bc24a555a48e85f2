mod address;
mod id;
mod label;
mod media;
mod name;
mod star;
mod status;

pub use self::{address::*, id::*, label::*, media::*, name::*, star::*, status::*};
use destructure::{Destructure, Mutation};
use error_stack::Report;
use time::OffsetDateTime;
use vodca::References;

use crate::entity::{CreatedAt, Identity, Price, RoomTypes, UpdatedAt, UserId};
use crate::KernelError;

#[derive(Debug, Clone, PartialEq, References, Destructure, Mutation)]
pub struct Hotel {
    id: HotelId,
    owner: UserId,
    name: HotelName,
    name_en: HotelName,
    address: Address,
    city: City,
    star_rating: StarRating,
    opening_date: OpeningDate,
    tags: Tags,
    amenities: Amenities,
    banner_image: Option<ImageUrl>,
    images: Vec<ImageUrl>,
    geo: Option<GeoPoint>,
    featured: Featured,
    status: HotelStatus,
    reason: Option<RejectReason>,
    room_types: RoomTypes,
    created_at: CreatedAt<Hotel>,
    updated_at: UpdatedAt<Hotel>,
}

impl Hotel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: HotelId,
        owner: UserId,
        name: HotelName,
        name_en: HotelName,
        address: Address,
        city: City,
        star_rating: StarRating,
        opening_date: OpeningDate,
        tags: Tags,
        amenities: Amenities,
        banner_image: Option<ImageUrl>,
        images: Vec<ImageUrl>,
        geo: Option<GeoPoint>,
        featured: Featured,
        status: HotelStatus,
        reason: Option<RejectReason>,
        room_types: RoomTypes,
        created_at: CreatedAt<Hotel>,
        updated_at: UpdatedAt<Hotel>,
    ) -> Self {
        Self {
            id,
            owner,
            name,
            name_en,
            address,
            city,
            star_rating,
            opening_date,
            tags,
            amenities,
            banner_image,
            images,
            geo,
            featured,
            status,
            reason,
            room_types,
            created_at,
            updated_at,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == HotelStatus::Approved
    }

    pub fn min_price(&self) -> Price {
        self.room_types.min_price()
    }

    /// Banner if present, otherwise the first gallery image.
    pub fn display_image(&self) -> Option<&ImageUrl> {
        self.banner_image.as_ref().or_else(|| self.images.first())
    }

    /// Checks every aggregate invariant. Called before each write.
    pub fn validate(&self) -> Result<(), Report<KernelError>> {
        if self.name.is_blank() || self.name_en.is_blank() {
            return Err(KernelError::Validation.with_message("Hotel name is required"));
        }
        if self.address.is_blank() {
            return Err(KernelError::Validation.with_message("Address is required"));
        }
        if !self.star_rating.is_valid() {
            return Err(KernelError::Validation
                .with_message("Star rating must be between 3 and 5"));
        }
        if self.room_types.is_empty() {
            return Err(KernelError::Validation.with_message("Room types are required"));
        }
        for room_type in self.room_types.iter() {
            if room_type.name().as_ref().trim().is_empty() {
                return Err(KernelError::Validation.with_message("Room type is required"));
            }
            if room_type.price().is_negative() {
                return Err(KernelError::Validation
                    .with_message("Room price must be a positive number"));
            }
            if !room_type.max_guests().is_valid() {
                return Err(KernelError::Validation
                    .with_message("maxGuests must be between 1 and 10"));
            }
            if *room_type.inventory().as_ref() < 0 {
                return Err(KernelError::Validation.with_message("inventory must not be negative"));
            }
        }
        Ok(())
    }

    /// Content edits by a merchant send the hotel back to review.
    pub fn touch(&mut self, editor: &Identity, now: OffsetDateTime) {
        self.substitute(|hotel| {
            if !editor.is_admin() {
                *hotel.status = HotelStatus::Pending;
                *hotel.reason = None;
            }
            *hotel.updated_at = UpdatedAt::new(now);
        });
    }

    pub fn change_status(
        &mut self,
        status: HotelStatus,
        reason: Option<String>,
        now: OffsetDateTime,
    ) -> Result<(), Report<KernelError>> {
        let reason = match status {
            HotelStatus::Rejected => {
                let reason = reason
                    .map(RejectReason::new)
                    .filter(|reason| !reason.is_blank())
                    .ok_or_else(|| {
                        KernelError::Validation.with_message("Reason is required for rejected status")
                    })?;
                Some(reason)
            }
            _ => None,
        };
        self.substitute(|hotel| {
            *hotel.status = status;
            *hotel.reason = reason;
            *hotel.updated_at = UpdatedAt::new(now);
        });
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use time::macros::date;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::entity::room_type::test::room_type;
    use crate::entity::Role;

    pub(crate) fn hotel(status: HotelStatus, prices: &[i64]) -> Hotel {
        let now = OffsetDateTime::now_utc();
        Hotel::new(
            HotelId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            HotelName::new("易宿酒店"),
            HotelName::new("Easy Stay Hotel"),
            Address::new("1 Bund Road"),
            City::new("Shanghai"),
            StarRating::new(4),
            OpeningDate::new(date!(2020 - 05 - 01)),
            Tags::new(vec!["spa".to_string(), "pool".to_string()]),
            Amenities::default(),
            None,
            vec![],
            None,
            Featured::new(false),
            status,
            None,
            RoomTypes::new(prices.iter().map(|price| room_type(*price, 5)).collect::<Vec<_>>()),
            CreatedAt::new(now),
            UpdatedAt::new(now),
        )
    }

    #[test]
    fn valid_hotel_passes() {
        assert!(hotel(HotelStatus::Pending, &[100]).validate().is_ok());
    }

    #[test]
    fn invariants_are_enforced() {
        let no_rooms = hotel(HotelStatus::Pending, &[]);
        assert_eq!(
            no_rooms.validate().unwrap_err().current_context(),
            &KernelError::Validation
        );

        let negative = hotel(HotelStatus::Pending, &[-1]);
        assert!(negative.validate().is_err());

        let bad_star = hotel(HotelStatus::Pending, &[100])
            .reconstruct(|h| h.star_rating = StarRating::new(2));
        assert!(bad_star.validate().is_err());
    }

    #[test]
    fn merchant_edit_resets_to_pending() {
        let mut hotel = hotel(HotelStatus::Approved, &[100]);
        let merchant = Identity::new(hotel.owner().clone(), Role::Merchant);
        hotel.touch(&merchant, OffsetDateTime::now_utc());
        assert_eq!(hotel.status(), &HotelStatus::Pending);
    }

    #[test]
    fn admin_edit_keeps_status() {
        let mut hotel = hotel(HotelStatus::Approved, &[100]);
        let admin = Identity::new(UserId::new(Uuid::new_v4()), Role::Admin);
        hotel.touch(&admin, OffsetDateTime::now_utc());
        assert_eq!(hotel.status(), &HotelStatus::Approved);
    }

    #[test]
    fn rejection_requires_reason() {
        let mut hotel = hotel(HotelStatus::Pending, &[100]);
        let now = OffsetDateTime::now_utc();
        let err = hotel
            .change_status(HotelStatus::Rejected, Some("   ".to_string()), now)
            .unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Validation);
        assert_eq!(hotel.status(), &HotelStatus::Pending);

        hotel
            .change_status(HotelStatus::Rejected, Some("blurry photos".to_string()), now)
            .unwrap();
        assert_eq!(hotel.status(), &HotelStatus::Rejected);
        assert_eq!(
            hotel.reason().as_ref().map(|reason| reason.as_ref().as_str()),
            Some("blurry photos")
        );

        hotel
            .change_status(HotelStatus::Approved, Some("ignored".to_string()), now)
            .unwrap();
        assert!(hotel.reason().is_none());
        assert!(hotel.is_published());
    }
}
