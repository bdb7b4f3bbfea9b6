#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "No rendering context available: {}.", _0)]
    ContextUnavailable(String),
    #[fail(display = "Failed to compile shader, errors: \n{}.", _0)]
    ShaderCompileFailure(String),
    #[fail(display = "Failed to link program, errors: \n{}.", _0)]
    ProgramLinkFailure(String),
    #[fail(display = "Attribute({:?}) is undefined in shader sources.", _0)]
    AttributeNotFound(String),
    #[fail(display = "Program has not been initialized.")]
    ProgramNotInitialized,
    #[fail(display = "Program has not been linked.")]
    ProgramNotLinked,
    #[fail(display = "Backend: {}", _0)]
    Backend(String),
    #[fail(display = "Invalid settings: {}", _0)]
    Config(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Config(format!("{}", err))
    }
}

macro_rules! backend_err {
    ($e:expr) => {
        $crate::errors::Error::Backend(String::from($e))
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::errors::Error::Backend(format!($fmt, $($arg)+))
    };
}
