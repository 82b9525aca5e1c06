// Reference catalog endpoints

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::CatalogEntry;

impl ApiClient {
    pub async fn catalogo_estados(&self) -> Result<Vec<CatalogEntry>, Error> {
        self.get_json("/catalogos/estados", &[]).await
    }

    pub async fn catalogo_urgencias(&self) -> Result<Vec<CatalogEntry>, Error> {
        self.get_json("/catalogos/urgencias", &[]).await
    }

    pub async fn catalogo_ministerios(&self) -> Result<Vec<CatalogEntry>, Error> {
        self.get_json("/catalogos/ministerios", &[]).await
    }

    pub async fn catalogo_categorias(&self) -> Result<Vec<CatalogEntry>, Error> {
        self.get_json("/catalogos/categorias", &[]).await
    }

    /// Departments are a flat ordered list of display strings.
    pub async fn catalogo_departamentos(&self) -> Result<Vec<String>, Error> {
        self.get_json("/catalogos/departamentos", &[]).await
    }

    /// Localities for one department, also flat display strings.
    pub async fn catalogo_localidades(&self, departamento: &str) -> Result<Vec<String>, Error> {
        self.get_json(
            "/catalogos/localidades",
            &[("departamento", departamento.to_owned())],
        )
        .await
    }

    /// Validate a department/locality pair before creating a record.
    /// The backend answers 400 when the pair is unknown.
    pub async fn validate_geo(&self, departamento: &str, localidad: &str) -> Result<(), Error> {
        self.get_value(
            "/catalogos/geo",
            &[
                ("departamento", departamento.to_owned()),
                ("localidad", localidad.to_owned()),
            ],
        )
        .await?;
        Ok(())
    }
}
