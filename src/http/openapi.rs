//! OpenAPI 3.0 description of the REST API.
//!
//! The document is assembled once and served as plain JSON. Consumers point
//! Swagger UI or any other OpenAPI tool at `/api-docs/openapi.json`.

use serde_json::{json, Value};
use std::sync::OnceLock;

static DOCUMENT: OnceLock<Value> = OnceLock::new();

/// Get the OpenAPI document for the API.
pub fn document() -> &'static Value {
    DOCUMENT.get_or_init(build_document)
}

fn build_document() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "API de Vuelos y Destinos",
            "version": "1.0.0",
            "description": "Documentación de la API para gestionar vuelos y destinos"
        },
        "servers": [
            {
                "url": "http://172.17.40.7:3000",
                "description": "Servidor local"
            }
        ],
        "tags": [
            {
                "name": "Destinos",
                "description": "Operaciones relacionadas con la tabla \"destinos\""
            },
            {
                "name": "Vuelos",
                "description": "Operaciones relacionadas con la tabla \"vuelos\""
            }
        ],
        "paths": {
            "/destinos": {
                "get": {
                    "tags": ["Destinos"],
                    "summary": "Obtener todos los destinos",
                    "responses": {
                        "200": {
                            "description": "Lista de destinos",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Destino" }
                                    }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "tags": ["Destinos"],
                    "summary": "Crear un nuevo destino",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/NuevoDestino" }
                            }
                        }
                    },
                    "responses": {
                        "201": { "description": "Destino creado correctamente" }
                    }
                }
            },
            "/destinos/{id}": {
                "get": {
                    "tags": ["Destinos"],
                    "summary": "Obtener un destino por ID",
                    "parameters": [
                        {
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer" }
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "Detalles del destino",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Destino" }
                                }
                            }
                        },
                        "404": { "description": "Destino no encontrado" }
                    }
                },
                "put": {
                    "tags": ["Destinos"],
                    "summary": "Actualizar un destino existente",
                    "parameters": [
                        {
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer" }
                        }
                    ],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/NuevoDestino" }
                            }
                        }
                    },
                    "responses": {
                        "200": { "description": "Destino actualizado correctamente" }
                    }
                },
                "delete": {
                    "tags": ["Destinos"],
                    "summary": "Eliminar un destino",
                    "parameters": [
                        {
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer" }
                        }
                    ],
                    "responses": {
                        "200": { "description": "Destino eliminado correctamente" }
                    }
                }
            },
            "/vuelos": {
                "get": {
                    "tags": ["Vuelos"],
                    "summary": "Obtener todos los vuelos",
                    "responses": {
                        "200": {
                            "description": "Lista de vuelos",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/VueloDetallado" }
                                    }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "tags": ["Vuelos"],
                    "summary": "Crear un nuevo vuelo",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/NuevoVuelo" }
                            }
                        }
                    },
                    "responses": {
                        "201": { "description": "Vuelo creado correctamente" }
                    }
                }
            },
            "/vuelos/{id}": {
                "get": {
                    "tags": ["Vuelos"],
                    "summary": "Obtener un vuelo por ID",
                    "parameters": [
                        {
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer" }
                        }
                    ],
                    "responses": {
                        "200": {
                            "description": "Detalles del vuelo",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Vuelo" }
                                }
                            }
                        },
                        "404": { "description": "Vuelo no encontrado" }
                    }
                },
                "put": {
                    "tags": ["Vuelos"],
                    "summary": "Actualizar un vuelo existente",
                    "parameters": [
                        {
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer" }
                        }
                    ],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/RutaVuelo" }
                            }
                        }
                    },
                    "responses": {
                        "200": { "description": "Vuelo actualizado correctamente" }
                    }
                },
                "delete": {
                    "tags": ["Vuelos"],
                    "summary": "Eliminar un vuelo",
                    "parameters": [
                        {
                            "name": "id",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "integer" }
                        }
                    ],
                    "responses": {
                        "200": { "description": "Vuelo eliminado correctamente" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Destino": {
                    "type": "object",
                    "properties": {
                        "id_destino": { "type": "integer" },
                        "pais": { "type": "string" },
                        "ciudad": { "type": "string" }
                    }
                },
                "NuevoDestino": {
                    "type": "object",
                    "required": ["pais", "ciudad"],
                    "properties": {
                        "pais": { "type": "string" },
                        "ciudad": { "type": "string" }
                    }
                },
                "Vuelo": {
                    "type": "object",
                    "properties": {
                        "id_vuelo": { "type": "integer" },
                        "id_origen": { "type": "integer" },
                        "id_destino": { "type": "integer" },
                        "dia": { "type": "string", "format": "date" },
                        "hora": { "type": "string" },
                        "imagen_url": { "type": "string", "nullable": true }
                    }
                },
                "NuevoVuelo": {
                    "type": "object",
                    "required": ["id_origen", "id_destino", "dia", "hora"],
                    "properties": {
                        "id_origen": { "type": "integer" },
                        "id_destino": { "type": "integer" },
                        "dia": { "type": "string", "format": "date" },
                        "hora": { "type": "string" },
                        "imagen_url": { "type": "string", "nullable": true }
                    }
                },
                "RutaVuelo": {
                    "type": "object",
                    "required": ["id_origen", "id_destino"],
                    "properties": {
                        "id_origen": { "type": "integer" },
                        "id_destino": { "type": "integer" }
                    }
                },
                "VueloDetallado": {
                    "type": "object",
                    "properties": {
                        "id_vuelo": { "type": "integer" },
                        "origen_pais": { "type": "string" },
                        "origen_ciudad": { "type": "string" },
                        "destino_pais": { "type": "string" },
                        "destino_ciudad": { "type": "string" },
                        "dia": { "type": "string", "format": "date" },
                        "hora": { "type": "string" },
                        "imagen_url": { "type": "string", "nullable": true }
                    }
                }
            }
        }
    })
}
