pub mod callback;
pub mod clock;
pub mod machine;
pub mod navigator;
pub mod pkce;
pub mod session;
pub mod storage;
pub mod token;

pub use callback::{strip_callback_params, Callback, CallbackServer};
pub use clock::{Clock, ManualClock, SystemClock};
pub use machine::{AuthClient, ReturnOutcome};
pub use navigator::{BrowserNavigator, Navigation, Navigator, RecordingNavigator};
pub use pkce::{derive_challenge, generate_verifier, DEFAULT_VERIFIER_LENGTH};
pub use session::{AuthState, AuthorizationRequest, PendingAuth, Session};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use token::{exchange_code, TokenResponse};
