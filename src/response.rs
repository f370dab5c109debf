//! IRC numeric response codes as defined in RFC 2812.
//!
//! Only the numerics the engine dispatches on are enumerated; any other
//! code falls through [`Response::from_code`] as `None` and is surfaced
//! as a diagnostic event by the caller.

#![allow(non_camel_case_types)]

/// A numeric reply code the engine knows how to handle.
///
/// Response codes are categorized as:
/// - 001-099: Connection/registration
/// - 200-399: Command replies
/// - 400-599: Error replies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    /// 001 - Welcome to the IRC network. Completes registration.
    RPL_WELCOME = 1,
    /// 331 - No topic is set
    RPL_NOTOPIC = 331,
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    /// 353 - Channel membership listing, possibly split across lines
    RPL_NAMREPLY = 353,
    /// 366 - End of a names listing
    RPL_ENDOFNAMES = 366,
    /// 372 - Message of the day body
    RPL_MOTD = 372,
    /// 375 - Message of the day start
    RPL_MOTDSTART = 375,
    /// 376 - Message of the day end
    RPL_ENDOFMOTD = 376,
    /// 422 - No message of the day
    ERR_NOMOTD = 422,
    /// 433 - Nickname is already in use
    ERR_NICKNAMEINUSE = 433,
    /// 436 - Nickname collision
    ERR_NICKCOLLISION = 436,
    /// 464 - Password mismatch
    ERR_PASSWDMISMATCH = 464,
}

impl Response {
    /// Look up a handled response by its numeric code.
    pub fn from_code(code: u16) -> Option<Response> {
        let response = match code {
            1 => Response::RPL_WELCOME,
            331 => Response::RPL_NOTOPIC,
            332 => Response::RPL_TOPIC,
            353 => Response::RPL_NAMREPLY,
            366 => Response::RPL_ENDOFNAMES,
            372 => Response::RPL_MOTD,
            375 => Response::RPL_MOTDSTART,
            376 => Response::RPL_ENDOFMOTD,
            422 => Response::ERR_NOMOTD,
            433 => Response::ERR_NICKNAMEINUSE,
            436 => Response::ERR_NICKCOLLISION,
            464 => Response::ERR_PASSWDMISMATCH,
            _ => return None,
        };
        Some(response)
    }

    /// The numeric value of this response.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Whether this code is in the error range (400-599).
    pub fn is_error(self) -> bool {
        (400..600).contains(&self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Response::from_code(1), Some(Response::RPL_WELCOME));
        assert_eq!(Response::from_code(433), Some(Response::ERR_NICKNAMEINUSE));
        assert_eq!(Response::from_code(999), None);
    }

    #[test]
    fn test_code_round_trip() {
        assert_eq!(Response::RPL_NAMREPLY.code(), 353);
        assert_eq!(Response::from_code(353), Some(Response::RPL_NAMREPLY));
    }

    #[test]
    fn test_is_error() {
        assert!(Response::ERR_NICKNAMEINUSE.is_error());
        assert!(!Response::RPL_WELCOME.is_error());
        assert!(Response::ERR_PASSWDMISMATCH.is_error());
    }
}
