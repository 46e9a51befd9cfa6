use thiserror::Error;

#[derive(Error, Debug)]
pub enum InitError {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("could not find HTML element with id `{0}`")]
    InvalidElementId(String),

    #[error("HTML element with id `{0}` is not a canvas")]
    ElementIsNotCanvas(String),

    #[error("could not get WebGL2 context: {0}")]
    GetContext(String),

    #[error("could not initialize WebGL2")]
    InitializeWebGl,
}
