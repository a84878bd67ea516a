use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;

use super::schema::{destinos, vuelos};
use crate::api::{Destination, DestinationId, Flight, FlightId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = destinos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DestinationRow {
    pub id_destino: i64,
    pub pais: String,
    pub ciudad: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = destinos)]
pub struct NewDestinationRow {
    pub pais: String,
    pub ciudad: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vuelos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FlightRow {
    pub id_vuelo: i64,
    pub id_origen: i64,
    pub id_destino: i64,
    pub dia: NaiveDate,
    pub hora: NaiveTime,
    pub imagen_url: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = vuelos)]
pub struct NewFlightRow {
    pub id_origen: i64,
    pub id_destino: i64,
    pub dia: NaiveDate,
    pub hora: NaiveTime,
    pub imagen_url: Option<String>,
}

impl From<DestinationRow> for Destination {
    fn from(row: DestinationRow) -> Self {
        Destination {
            id_destino: DestinationId::new(row.id_destino),
            pais: row.pais,
            ciudad: row.ciudad,
        }
    }
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id_vuelo: FlightId::new(row.id_vuelo),
            id_origen: DestinationId::new(row.id_origen),
            id_destino: DestinationId::new(row.id_destino),
            dia: row.dia,
            hora: row.hora,
            imagen_url: row.imagen_url,
        }
    }
}
