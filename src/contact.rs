use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::OwnerEmail;
use crate::email_client::{DeliveryFault, EmailClient, MessagePayload};

const NOT_CONFIGURED_MESSAGE: &str =
    "Email delivery is not configured. Please supply the delivery credentials.";
const FALLBACK_MESSAGE: &str = "Oops! Something went wrong. Please try again.";

/// 单次提交的生命周期状态
/// `Error`携带展示给用户的错误文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Sending,
    Success,
    Error(String),
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Sending => "sending",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Name,
    Email,
    Subject,
    Message,
}

/// 终态展示时长: 成功3秒，失败5秒，随后自动回到`Idle`
#[derive(Debug, Clone, Copy)]
pub struct DismissSchedule {
    pub success: Duration,
    pub error: Duration,
}

impl Default for DismissSchedule {
    fn default() -> Self {
        Self {
            success: Duration::from_secs(3),
            error: Duration::from_secs(5),
        }
    }
}

/// 联系表单控制器
/// 持有唯一一份表单字段与提交状态，提交按表单实例串行
pub struct ContactForm {
    state: Arc<Mutex<FormState>>,
    email_client: EmailClient,
    owner_email: OwnerEmail,
    schedule: DismissSchedule,
}

struct FormState {
    fields: FormFields,
    status: SubmissionStatus,
    dismiss_timer: Option<JoinHandle<()>>,
    // abort对已越过最后一个await点的任务无效
    // 代数用于让这类陈旧定时器在取锁后自行退出
    dismiss_generation: u64,
}

impl FormState {
    fn cancel_dismiss(&mut self) {
        self.dismiss_generation = self.dismiss_generation.wrapping_add(1);
        if let Some(timer) = self.dismiss_timer.take() {
            timer.abort();
        }
    }
}

impl Drop for FormState {
    fn drop(&mut self) {
        // 挂起的定时器不得在实例销毁后触发
        self.cancel_dismiss();
    }
}

impl ContactForm {
    pub fn new(email_client: EmailClient, owner_email: OwnerEmail) -> Self {
        Self::with_schedule(email_client, owner_email, DismissSchedule::default())
    }

    pub fn with_schedule(
        email_client: EmailClient,
        owner_email: OwnerEmail,
        schedule: DismissSchedule,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(FormState {
                fields: FormFields::default(),
                status: SubmissionStatus::Idle,
                dismiss_timer: None,
                dismiss_generation: 0,
            })),
            email_client,
            owner_email,
            schedule,
        }
    }

    /// 纯状态赋值，只改动指定字段，任何状态下均可调用
    pub fn update_field(&self, field: FieldName, value: String) {
        let mut state = self.lock();
        match field {
            FieldName::Name => state.fields.name = value,
            FieldName::Email => state.fields.email = value,
            FieldName::Subject => state.fields.subject = value,
            FieldName::Message => state.fields.message = value,
        }
    }

    pub fn fields(&self) -> FormFields {
        self.lock().fields.clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.lock().status.clone()
    }

    /// 提交当前表单内容
    /// 每次失败对该次尝试都是终态，不自动重试，由用户手动重新提交
    #[tracing::instrument(name = "submitting contact message", skip_all)]
    pub async fn submit(&self) {
        {
            let mut state = self.lock();
            // 提交按表单实例串行，发送期间的提交直接忽略
            if state.status == SubmissionStatus::Sending {
                tracing::warn!("a submission is already in flight, ignored.");
                return;
            }
            state.cancel_dismiss();
            state.status = SubmissionStatus::Sending;
        }

        // 凭据完整性在任何网络调用之前检查
        if !self.email_client.is_configured() {
            tracing::error!("delivery credentials are incomplete.");
            self.settle(
                SubmissionStatus::Error(NOT_CONFIGURED_MESSAGE.into()),
                self.schedule.error,
            );
            return;
        }

        let fields = self.fields();
        let payload = MessagePayload {
            from_name: &fields.name,
            from_email: &fields.email,
            subject: &fields.subject,
            message: &fields.message,
            to_email: self.owner_email.as_ref(),
        };

        match self.email_client.send(&payload).await {
            Ok(()) => {
                tracing::info!("contact message delivered.");
                self.lock().fields = FormFields::default();
                self.settle(SubmissionStatus::Success, self.schedule.success);
            }
            Err(fault) => {
                // 失败时保留用户输入，便于修改后重新提交
                tracing::error!("contact message delivery failed. {fault}");
                self.settle(
                    SubmissionStatus::Error(user_message(&fault)),
                    self.schedule.error,
                );
            }
        }
    }

    fn settle(&self, status: SubmissionStatus, dismiss_after: Duration) {
        let mut state = self.lock();
        state.status = status;
        state.cancel_dismiss();
        let generation = state.dismiss_generation;
        state.dismiss_timer = Some(tokio::spawn(dismiss_later(
            Arc::downgrade(&self.state),
            generation,
            dismiss_after,
        )));
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().expect("form state lock poisoned.")
    }
}

async fn dismiss_later(state: Weak<Mutex<FormState>>, generation: u64, delay: Duration) {
    tokio::time::sleep(delay).await;
    // 表单实例可能已在定时器挂起期间销毁
    if let Some(state) = state.upgrade() {
        let mut state = state.lock().expect("form state lock poisoned.");
        // 被取消但已在执行中的定时器会走到这里
        // 只有仍属当前批次时才允许复位状态
        if state.dismiss_generation != generation {
            return;
        }
        state.status = SubmissionStatus::Idle;
        state.dismiss_timer = None;
    }
}

/// 故障对象到用户可见文本的映射，按优先级:
/// 服务自身描述 > 通用消息 > 状态码 > 兜底文案
fn user_message(fault: &DeliveryFault) -> String {
    if let Some(text) = &fault.text {
        format!("Error: {text}")
    } else if let Some(message) = &fault.message {
        format!("Error: {message}")
    } else if let Some(status) = fault.status {
        format!("delivery error ({status}). Please check your configuration.")
    } else {
        FALLBACK_MESSAGE.into()
    }
}
