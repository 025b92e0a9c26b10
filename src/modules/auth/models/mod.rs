mod profile;
mod user;

pub use profile::{Profile, ProfileRead};
pub use user::{
    ChangePasswordInput, ChangePasswordResponse, JwtOut, ProfilePatch, UpdateEmailInput, User,
    UserCreate, UserLogin, UserRead, UserReadSimple, UserRegister, UserRole, UserUpdate,
    USER_SEARCH_MAPPINGS,
};
