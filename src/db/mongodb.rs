use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use crate::api::AppError;
use crate::config::Config;

pub type Result<T> = std::result::Result<T, AppError>;

/// Documento de reserva tal como se guarda en la colección
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Reserva {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub nombre_cliente: String,
    pub fecha_reserva: BsonDateTime,
    pub numero_personas: i32,
    pub telefono: String,
    pub email: String,
}

/// Cliente MongoDB compartido por todos los workers
#[derive(Debug, Clone)]
pub struct MongoRepo {
    pub client: Client,
    pub database: Database,
    collection: String,
}

impl MongoRepo {
    /// Crea el cliente sin tocar el servidor.
    ///
    /// El driver conecta de forma perezosa, así que un servidor caído
    /// solo se detecta en la primera operación.
    pub async fn connect(config: &Config) -> Result<MongoRepo> {
        let client = Client::with_uri_str(&config.mongo_url)
            .await
            .map_err(|e| AppError::Internal(format!("Error conectando a MongoDB: {}", e)))?;

        let database = client.database(&config.mongo_database);

        Ok(MongoRepo {
            client,
            database,
            collection: config.mongo_collection.clone(),
        })
    }

    pub fn reservas(&self) -> Collection<Reserva> {
        self.database.collection(&self.collection)
    }

    /// Comando `ping` contra la base de datos configurada
    pub async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! {"ping": 1})
            .await
            .map_err(|e| AppError::database("Error al conectar a MongoDB", e))?;

        tracing::debug!(database = %self.database.name(), "Ping a MongoDB correcto");
        Ok(())
    }

    /// Cierra el pool de conexiones al apagar el servidor
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        tracing::info!("Cliente MongoDB cerrado");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> Config {
        Config {
            mongo_url: url.to_string(),
            mongo_database: "Reserva".to_string(),
            mongo_collection: "reserva_restaurante".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            static_dir: "static".into(),
            templates_dir: "templates".into(),
        }
    }

    #[test]
    fn malformed_connection_string_is_rejected() {
        let result = tokio_test::block_on(MongoRepo::connect(&config("http://not-mongo")));
        match result {
            Err(AppError::Internal(message)) => assert!(message.contains("Error conectando a MongoDB")),
            other => panic!("se esperaba un error interno, se obtuvo {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn collection_name_comes_from_config() {
        let mut cfg = config("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=100");
        cfg.mongo_collection = "otra_coleccion".to_string();

        let repo = MongoRepo::connect(&cfg).await.unwrap();
        assert_eq!(repo.reservas().name(), "otra_coleccion");
        assert_eq!(repo.database.name(), "Reserva");
    }

    #[tokio::test]
    async fn ping_against_unreachable_store_is_a_database_error() {
        let repo = MongoRepo::connect(&config("mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=100"))
            .await
            .unwrap();

        match repo.ping().await {
            Err(err @ AppError::Database { .. }) => {
                assert!(err.to_string().starts_with("Error al conectar a MongoDB: "))
            }
            other => panic!("se esperaba un error de base de datos, se obtuvo {:?}", other),
        }
    }
}
