//! In-memory repository implementation.
//!
//! `LocalRepository` keeps both entity tables in `BTreeMap`s behind a single
//! `RwLock`, assigning serial ids the way the SQL backend's sequences do.
//! It enforces no foreign-key constraints: a flight may reference missing
//! destinations and is then simply absent from itinerary listings.
//!
//! Clones share the same underlying store, so a repository can be handed to
//! concurrent tasks.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::api::{
    Destination, DestinationId, Flight, FlightId, FlightItinerary, FlightRoute, NewDestination,
    NewFlight,
};
use crate::db::repository::error::{RepositoryError, RepositoryResult};
use crate::db::repository::{DestinationRepository, FlightRepository, FullRepository};

#[derive(Debug)]
struct Store {
    destinations: BTreeMap<i64, Destination>,
    flights: BTreeMap<i64, Flight>,
    next_destination_id: i64,
    next_flight_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            destinations: BTreeMap::new(),
            flights: BTreeMap::new(),
            next_destination_id: 1,
            next_flight_id: 1,
        }
    }
}

/// In-memory repository for unit testing and local development.
#[derive(Debug, Clone, Default)]
pub struct LocalRepository {
    store: Arc<RwLock<Store>>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_store(&self) -> RepositoryResult<RwLockReadGuard<'_, Store>> {
        self.store
            .read()
            .map_err(|_| RepositoryError::internal("repository lock poisoned"))
    }

    fn write_store(&self) -> RepositoryResult<RwLockWriteGuard<'_, Store>> {
        self.store
            .write()
            .map_err(|_| RepositoryError::internal("repository lock poisoned"))
    }
}

#[async_trait]
impl DestinationRepository for LocalRepository {
    async fn list_destinations(&self) -> RepositoryResult<Vec<Destination>> {
        let store = self.read_store()?;
        Ok(store.destinations.values().cloned().collect())
    }

    async fn get_destination(&self, id: DestinationId) -> RepositoryResult<Destination> {
        let store = self.read_store()?;
        store
            .destinations
            .get(&id.value())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Destination {} not found", id)))
    }

    async fn create_destination(
        &self,
        destination: &NewDestination,
    ) -> RepositoryResult<DestinationId> {
        let mut store = self.write_store()?;
        let id = store.next_destination_id;
        store.next_destination_id += 1;
        store.destinations.insert(
            id,
            Destination::new(
                DestinationId::new(id),
                destination.pais.clone(),
                destination.ciudad.clone(),
            ),
        );
        Ok(DestinationId::new(id))
    }

    async fn update_destination(
        &self,
        id: DestinationId,
        destination: &NewDestination,
    ) -> RepositoryResult<usize> {
        let mut store = self.write_store()?;
        match store.destinations.get_mut(&id.value()) {
            Some(existing) => {
                existing.pais = destination.pais.clone();
                existing.ciudad = destination.ciudad.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_destination(&self, id: DestinationId) -> RepositoryResult<usize> {
        let mut store = self.write_store()?;
        Ok(usize::from(store.destinations.remove(&id.value()).is_some()))
    }
}

#[async_trait]
impl FlightRepository for LocalRepository {
    async fn list_flight_itineraries(&self) -> RepositoryResult<Vec<FlightItinerary>> {
        let store = self.read_store()?;
        let itineraries = store
            .flights
            .values()
            .filter_map(|flight| {
                // Inner-join semantics: both endpoints must resolve.
                let origin = store.destinations.get(&flight.id_origen.value())?;
                let destination = store.destinations.get(&flight.id_destino.value())?;
                Some(FlightItinerary {
                    id_vuelo: flight.id_vuelo,
                    origen_pais: origin.pais.clone(),
                    origen_ciudad: origin.ciudad.clone(),
                    destino_pais: destination.pais.clone(),
                    destino_ciudad: destination.ciudad.clone(),
                    dia: flight.dia,
                    hora: flight.hora,
                    imagen_url: flight.imagen_url.clone(),
                })
            })
            .collect();
        Ok(itineraries)
    }

    async fn get_flight(&self, id: FlightId) -> RepositoryResult<Flight> {
        let store = self.read_store()?;
        store
            .flights
            .get(&id.value())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Flight {} not found", id)))
    }

    async fn create_flight(&self, flight: &NewFlight) -> RepositoryResult<FlightId> {
        let mut store = self.write_store()?;
        let id = store.next_flight_id;
        store.next_flight_id += 1;
        store.flights.insert(
            id,
            Flight {
                id_vuelo: FlightId::new(id),
                id_origen: flight.id_origen,
                id_destino: flight.id_destino,
                dia: flight.dia,
                hora: flight.hora,
                imagen_url: flight.imagen_url.clone(),
            },
        );
        Ok(FlightId::new(id))
    }

    async fn update_flight_route(
        &self,
        id: FlightId,
        route: &FlightRoute,
    ) -> RepositoryResult<usize> {
        let mut store = self.write_store()?;
        match store.flights.get_mut(&id.value()) {
            Some(existing) => {
                existing.id_origen = route.id_origen;
                existing.id_destino = route.id_destino;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_flight(&self, id: FlightId) -> RepositoryResult<usize> {
        let mut store = self.write_store()?;
        Ok(usize::from(store.flights.remove(&id.value()).is_some()))
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<()> {
        self.read_store().map(|_| ())
    }
}
