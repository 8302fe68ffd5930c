//! Error types for farm construction, parsing, simulation and solving

/// Rejected farm construction step
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FarmError {
    #[error("invalid number of ants: {0}")]
    InvalidAntCount(usize),

    #[error("invalid room name: {0}")]
    InvalidRoomName(String),

    #[error("duplicate room name: {0}")]
    DuplicateRoom(String),

    #[error("room {0} does not exist")]
    UnknownRoom(String),

    #[error("room cannot link to itself: {0}")]
    SelfLink(String),

    #[error("duplicate tunnel: {0}-{1}")]
    DuplicateTunnel(String, String),

    #[error("multiple start rooms defined")]
    DuplicateStart,

    #[error("multiple end rooms defined")]
    DuplicateEnd,

    #[error("no start room found")]
    MissingStart,

    #[error("no end room found")]
    MissingEnd,

    #[error("start and end must be different rooms")]
    StartIsEnd,

    #[error("insufficient number of rooms")]
    TooFewRooms,
}

/// Farm description that could not be read
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty file")]
    Empty,

    #[error("line {line}: invalid data format, first line must be number of ants, got {text:?}")]
    InvalidAntCount { line: usize, text: String },

    #[error("line {line}: invalid room format: {text}")]
    InvalidRoom { line: usize, text: String },

    #[error("line {line}: invalid tunnel format: {text}")]
    InvalidTunnel { line: usize, text: String },

    #[error("line {line}: no room defined after {command}")]
    MissingCommandTarget { line: usize, command: String },

    #[error("line {line}: {source}")]
    Farm {
        line: usize,
        #[source]
        source: FarmError,
    },

    #[error(transparent)]
    Build(#[from] FarmError),
}

/// Failure while moving ants along a plan
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    /// A whole turn passed without any ant changing state
    #[error("deadlock at turn {turn}: {unfinished} ants cannot move")]
    Deadlock { turn: usize, unfinished: usize },

    #[error("distribution covers {entries} routes but the group has {routes}")]
    DistributionMismatch { routes: usize, entries: usize },

    #[error("route {route} has no rooms")]
    EmptyRoute { route: usize },
}

/// Failure of a full optimisation pass
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("no route exists from start to end")]
    NoRoute,

    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),
}
