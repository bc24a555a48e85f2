mod capacity;
mod id;
mod label;
mod policy;
mod price;

pub use self::{capacity::*, id::*, label::*, policy::*, price::*};
use destructure::{Destructure, Mutation};
use vodca::{AsRefln, Fromln, References};

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct RoomType {
    id: RoomTypeId,
    name: RoomTypeName,
    price: Price,
    bed_type: BedType,
    breakfast: Breakfast,
    cancel_policy: CancelPolicy,
    max_guests: MaxGuests,
    inventory: Inventory,
}

impl RoomType {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RoomTypeId,
        name: RoomTypeName,
        price: Price,
        bed_type: BedType,
        breakfast: Breakfast,
        cancel_policy: CancelPolicy,
        max_guests: MaxGuests,
        inventory: Inventory,
    ) -> Self {
        Self {
            id,
            name,
            price,
            bed_type,
            breakfast,
            cancel_policy,
            max_guests,
            inventory,
        }
    }

    pub fn is_sold_out(&self) -> bool {
        !self.inventory.is_available()
    }
}

/// Room types owned by one hotel, keyed by their stable ids.
#[derive(Debug, Clone, Default, Eq, PartialEq, Fromln, AsRefln)]
pub struct RoomTypes(Vec<RoomType>);

impl RoomTypes {
    pub fn new(room_types: impl Into<Vec<RoomType>>) -> Self {
        Self(room_types.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoomType> {
        self.0.iter()
    }

    pub fn find(&self, id: &RoomTypeId) -> Option<&RoomType> {
        self.0.iter().find(|room_type| room_type.id() == id)
    }

    pub fn prices(&self) -> impl Iterator<Item = Price> + '_ {
        self.0.iter().map(|room_type| *room_type.price())
    }

    /// Cheapest nightly price, zero for a hotel without room types.
    pub fn min_price(&self) -> Price {
        self.prices().min().unwrap_or_default()
    }

    pub fn sorted_by_price(mut self) -> Self {
        self.0.sort_by_key(|room_type| *room_type.price());
        self
    }

    pub fn push(&mut self, room_type: RoomType) {
        self.0.push(room_type);
    }

    /// Replaces the room type carrying the same id, returning false if none does.
    pub fn replace(&mut self, room_type: RoomType) -> bool {
        match self.0.iter_mut().find(|current| current.id() == room_type.id()) {
            Some(current) => {
                *current = room_type;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &RoomTypeId) -> Option<RoomType> {
        let index = self.0.iter().position(|room_type| room_type.id() == id)?;
        Some(self.0.remove(index))
    }
}

impl IntoIterator for RoomTypes {
    type Item = RoomType;
    type IntoIter = std::vec::IntoIter<RoomType>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
