use destructure::Destructure;
use vodca::References;

use crate::entity::{
    Address, BedType, Breakfast, CancelPolicy, City, Hotel, HotelName, MaxGuests, RoomType,
    RoomTypeName, StarRating,
};

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct HotelSnapshot {
    name: HotelName,
    city: City,
    address: Address,
    star_rating: StarRating,
}

impl HotelSnapshot {
    pub fn new(name: HotelName, city: City, address: Address, star_rating: StarRating) -> Self {
        Self {
            name,
            city,
            address,
            star_rating,
        }
    }

    pub fn capture(hotel: &Hotel) -> Self {
        let name = if hotel.name().is_blank() {
            hotel.name_en().clone()
        } else {
            hotel.name().clone()
        };
        Self::new(
            name,
            hotel.city().clone(),
            hotel.address().clone(),
            *hotel.star_rating(),
        )
    }
}

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct RoomTypeSnapshot {
    name: RoomTypeName,
    bed_type: BedType,
    breakfast: Breakfast,
    cancel_policy: CancelPolicy,
    max_guests: MaxGuests,
}

impl RoomTypeSnapshot {
    pub fn new(
        name: RoomTypeName,
        bed_type: BedType,
        breakfast: Breakfast,
        cancel_policy: CancelPolicy,
        max_guests: MaxGuests,
    ) -> Self {
        Self {
            name,
            bed_type,
            breakfast,
            cancel_policy,
            max_guests,
        }
    }

    pub fn capture(room_type: &RoomType) -> Self {
        Self::new(
            room_type.name().clone(),
            room_type.bed_type().clone(),
            *room_type.breakfast(),
            *room_type.cancel_policy(),
            *room_type.max_guests(),
        )
    }
}
